//! Generator settings loaded from TOML, with a discovery order for the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::palette::{default_palette, PaletteEntry};

/// Everything the generator needs that the original scripts hard-coded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Directory that literal-list slides are written under.
    pub output_root: PathBuf,
    /// Directory that config image paths are resolved against.
    pub project_root: PathBuf,
    /// Draw the decorative ring on centered slides.
    pub draw_ring: bool,
    /// Font candidates and point sizes.
    pub fonts: FontsConfig,
    /// Background/text color lookup table for config mode.
    pub palette: Vec<PaletteEntry>,
    /// Replaces the built-in deck for literal-list mode.
    pub slides: Option<Vec<SlideEntry>>,
}

/// Font probing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Candidate files for titles, tried in order.
    pub title: Vec<PathBuf>,
    /// Candidate files for subtitles, tried in order.
    pub subtitle: Vec<PathBuf>,
    /// Title size on centered slides.
    pub centered_title_size: f32,
    /// Subtitle size on centered slides.
    pub centered_subtitle_size: f32,
    /// Title size on fixed-offset slides.
    pub offset_title_size: f32,
    /// Subtitle size on fixed-offset slides.
    pub offset_subtitle_size: f32,
}

/// One entry of a literal slide list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlideEntry {
    /// File name relative to the output root.
    pub file: String,
    /// Title drawn on the slide.
    pub title: String,
    /// Background color; channels outside 0..=255 saturate.
    pub color: [i32; 3],
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            output_root: PathBuf::from("public/images"),
            project_root: PathBuf::from("public"),
            draw_ring: true,
            fonts: FontsConfig::default(),
            palette: default_palette(),
            slides: None,
        }
    }
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            title: vec![
                PathBuf::from("/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
            ],
            subtitle: vec![
                PathBuf::from("/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            ],
            centered_title_size: 80.0,
            centered_subtitle_size: 40.0,
            offset_title_size: 48.0,
            offset_subtitle_size: 24.0,
        }
    }
}

impl GeneratorConfig {
    /// Load settings from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// canvas dimensions are zero.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))?;
        if config.width == 0 || config.height == 0 {
            return Err(format!("Canvas dimensions must be non-zero in {}", path.display()));
        }
        Ok(config)
    }
}

/// Discover the settings file path using the resolution order:
/// 1. Explicit path (from `--settings` flag)
/// 2. `SLIDEGEN_CONFIG` environment variable
/// 3. `./slidegen.toml`
#[must_use]
pub fn discover_settings_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = std::env::var("SLIDEGEN_CONFIG") {
        return PathBuf::from(p);
    }

    PathBuf::from("slidegen.toml")
}
