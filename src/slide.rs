//! The in-memory description of one slide image.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use image::Rgb;

use crate::error::SlideError;

/// Where title and subtitle go on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Title centered above the middle, file-name subtitle, decorative ring.
    Centered,
    /// Title and `Slide N` subtitle at a fixed left offset.
    FixedOffset,
}

/// One image to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSpec {
    /// Title text; may be empty.
    pub display_text: String,
    /// Destination file, already joined to its root.
    pub output_path: PathBuf,
    /// Canvas fill.
    pub background: Rgb<u8>,
    /// Text and ring color.
    pub foreground: Rgb<u8>,
    /// 1-based ordinal within the owning list or node.
    pub index: usize,
    /// Placement of the text.
    pub layout: Layout,
}

impl SlideSpec {
    /// The line drawn below the title.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match self.layout {
            Layout::FixedOffset => format!("Slide {}", self.index),
            Layout::Centered => {
                let name = self
                    .output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("Sample image - {name}")
            }
        }
    }
}

/// Join `raw` onto `root`, stripping one leading separator first.
///
/// # Errors
///
/// Returns [`SlideError::UnsafeOutputPath`] if the result would land outside
/// `root` (still absolute after stripping, or containing `..`), or if `raw`
/// names no file.
pub fn normalize_output_path(root: &Path, raw: &str) -> Result<PathBuf, SlideError> {
    let stripped = raw.strip_prefix(['/', '\\']).unwrap_or(raw);
    let relative = Path::new(stripped);

    let normal = |c: Component<'_>| matches!(c, Component::Normal(_) | Component::CurDir);
    if !relative.components().all(normal) || relative.file_name().is_none() {
        return Err(SlideError::UnsafeOutputPath(raw.to_string()));
    }

    Ok(root.join(relative))
}

/// Reject a batch in which two specs would write the same file.
///
/// # Errors
///
/// Returns [`SlideError::DuplicateOutput`] naming the first repeated path.
pub fn check_unique_outputs(specs: &[SlideSpec]) -> Result<(), SlideError> {
    let mut seen = HashSet::with_capacity(specs.len());
    for spec in specs {
        if !seen.insert(spec.output_path.as_path()) {
            return Err(SlideError::DuplicateOutput { path: spec.output_path.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(path: &str, layout: Layout) -> SlideSpec {
        SlideSpec {
            display_text: "T".into(),
            output_path: PathBuf::from(path),
            background: Rgb([0, 0, 0]),
            foreground: Rgb([255, 255, 255]),
            index: 3,
            layout,
        }
    }

    #[test]
    fn strips_single_leading_separator() {
        let root = Path::new("public");
        assert_eq!(
            normalize_output_path(root, "/images/slide_1.png").unwrap(),
            PathBuf::from("public/images/slide_1.png")
        );
        assert_eq!(
            normalize_output_path(root, "images/slide_1.png").unwrap(),
            PathBuf::from("public/images/slide_1.png")
        );
    }

    #[test]
    fn rejects_paths_escaping_root() {
        let root = Path::new("public");
        assert!(normalize_output_path(root, "//etc/passwd").is_err());
        assert!(normalize_output_path(root, "../outside.png").is_err());
        assert!(normalize_output_path(root, "/images/../../x.png").is_err());
        assert!(normalize_output_path(root, "/").is_err());
        assert!(normalize_output_path(root, "").is_err());
    }

    #[test]
    fn subtitle_per_layout() {
        assert_eq!(spec("out/slide_4.png", Layout::FixedOffset).subtitle(), "Slide 3");
        assert_eq!(
            spec("out/slide_4.png", Layout::Centered).subtitle(),
            "Sample image - slide_4.png"
        );
    }

    #[test]
    fn duplicate_outputs_detected() {
        let specs = vec![
            spec("out/a.png", Layout::Centered),
            spec("out/b.png", Layout::Centered),
            spec("out/a.png", Layout::FixedOffset),
        ];
        match check_unique_outputs(&specs) {
            Err(SlideError::DuplicateOutput { path }) => {
                assert_eq!(path, PathBuf::from("out/a.png"));
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
        assert!(check_unique_outputs(&specs[..2]).is_ok());
    }
}
