//! Building slide specs from a node configuration or a literal list.

use std::path::Path;

use image::Rgb;
use serde::de::Error as _;
use serde::Deserialize;

use crate::error::SlideError;
use crate::palette::{clamp_rgb, gradient_color, Palette, WHITE};
use crate::settings::SlideEntry;
use crate::slide::{normalize_output_path, Layout, SlideSpec};

/// Top level of the viewer's `config.json`.
#[derive(Debug, Deserialize)]
struct NodeConfig {
    #[serde(default)]
    nodes: serde_json::Map<String, serde_json::Value>,
}

/// One named node; fields other than `images` belong to the viewer.
#[derive(Debug, Deserialize)]
struct NodeEntry {
    #[serde(default)]
    images: Vec<String>,
}

/// A `(filename, title, color)` entry of a literal slide list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSlide {
    /// File name relative to the output root.
    pub file: String,
    /// Title drawn on the slide.
    pub title: String,
    /// Background color.
    pub color: Rgb<u8>,
}

impl From<&SlideEntry> for LiteralSlide {
    fn from(entry: &SlideEntry) -> Self {
        let [r, g, b] = entry.color;
        Self { file: entry.file.clone(), title: entry.title.clone(), color: clamp_rgb(r, g, b) }
    }
}

/// Read a node configuration and produce one spec per declared image.
///
/// Nodes keep document order. A node with several images gets its position
/// appended to the title, e.g. `"Name (2/3)"`. Colors cycle through
/// `palette` across the whole file.
///
/// # Errors
///
/// Returns [`SlideError::ConfigNotFound`] if `config_path` does not exist,
/// [`SlideError::ConfigParse`] if it is not JSON of the expected shape, and
/// [`SlideError::UnsafeOutputPath`] if an image path escapes `project_root`.
pub fn load_specs_from_config(
    config_path: &Path,
    project_root: &Path,
    palette: &Palette,
) -> Result<Vec<SlideSpec>, SlideError> {
    if !config_path.exists() {
        return Err(SlideError::ConfigNotFound { path: config_path.to_path_buf() });
    }
    let bytes = std::fs::read(config_path)?;
    let parse_err = |source| SlideError::ConfigParse { path: config_path.to_path_buf(), source };
    let document: serde_json::Value = serde_json::from_slice(&bytes).map_err(parse_err)?;
    if !document.is_object() {
        let source = serde_json::Error::custom("expected an object with a `nodes` map");
        return Err(parse_err(source));
    }
    let config: NodeConfig = serde_json::from_value(document).map_err(parse_err)?;

    let mut specs = Vec::new();
    for (name, value) in config.nodes {
        let node: NodeEntry = serde_json::from_value(value).map_err(parse_err)?;
        let total = node.images.len();
        for (i, image) in node.images.iter().enumerate() {
            let display_text =
                if total == 1 { name.clone() } else { format!("{name} ({}/{total})", i + 1) };
            let (background, foreground) = palette.pick(specs.len());
            specs.push(SlideSpec {
                display_text,
                output_path: normalize_output_path(project_root, image)?,
                background,
                foreground,
                index: i + 1,
                layout: Layout::Centered,
            });
        }
    }

    tracing::debug!(path = %config_path.display(), count = specs.len(), "loaded node config");
    Ok(specs)
}

/// Map a literal list 1:1 onto specs under `output_root`.
///
/// Entries whose file name would escape the root are skipped with a warning.
#[must_use]
pub fn load_specs_from_literal_list(
    output_root: &Path,
    entries: &[LiteralSlide],
) -> Vec<SlideSpec> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match normalize_output_path(output_root, &entry.file) {
            Ok(output_path) => Some(SlideSpec {
                display_text: entry.title.clone(),
                output_path,
                background: entry.color,
                foreground: WHITE,
                index: i + 1,
                layout: Layout::FixedOffset,
            }),
            Err(e) => {
                tracing::warn!(file = %entry.file, error = %e, "skipping slide entry");
                None
            }
        })
        .collect()
}

/// Titles of the built-in deck, written to `slide_2.png` onwards.
const DECK_TITLES: &[&str] = &[
    "Part 1: Project Overview",
    "1.1 Background",
    "1.2 Market Analysis",
    "1.3 Goals",
    "1.4 Core Value",
    "Part 2: Technical Approach",
    "2.1 System Architecture",
    "2.2 Frontend Stack",
    "2.3 Backend Stack",
    "2.4 Database Design",
    "2.5 Security",
    "Part 3: Feature Modules",
    "3.1 User Management",
    "3.2 Permissions",
    "3.3 Data Analysis",
    "3.4 Reporting",
    "3.5 Notifications",
    "Part 4: Implementation Plan",
    "4.1 Phase One: Requirements",
    "4.2 Phase Two: Design",
    "4.3 Phase Three: Development",
    "4.4 Phase Four: Testing and Launch",
    "Part 5: Teamwork",
    "5.1 Team Structure",
    "5.2 Development Process",
    "5.3 Quality Assurance",
    "Part 6: Risk Management",
    "6.1 Technical Risks",
    "6.2 Schedule Risks",
    "6.3 Mitigation",
    "Part 7: Summary and Outlook",
    "7.1 Results",
    "7.2 Lessons Learned",
    "7.3 Next Steps",
];

/// The deck rendered by literal-list mode when no `[[slides]]` are configured.
#[must_use]
pub fn builtin_deck() -> Vec<LiteralSlide> {
    DECK_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| LiteralSlide {
            file: format!("slide_{}.png", i + 2),
            title: (*title).to_string(),
            color: gradient_color(i),
        })
        .collect()
}

/// Welcome, closing and Q&A slides placed under `images/examples/`.
///
/// # Errors
///
/// Never fails for the fixed paths used here; the `Result` mirrors
/// [`normalize_output_path`].
pub fn extra_specs(project_root: &Path, palette: &Palette) -> Result<Vec<SlideSpec>, SlideError> {
    [("Welcome", "welcome.png"), ("Thanks for Watching", "thanks.png"), ("Q&A", "qa.png")]
        .into_iter()
        .enumerate()
        .map(|(i, (title, file))| -> Result<SlideSpec, SlideError> {
            let (background, foreground) = palette.pick(i);
            let image = format!("/images/examples/{file}");
            Ok(SlideSpec {
                display_text: title.to_string(),
                output_path: normalize_output_path(project_root, &image)?,
                background,
                foreground,
                index: 1,
                layout: Layout::Centered,
            })
        })
        .collect()
}
