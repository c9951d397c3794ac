//! Unified error type for slidegen.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading slide specs or rendering them.
#[derive(Debug, Error)]
pub enum SlideError {
    /// The node configuration file does not exist.
    #[error("Config file not found: {}", path.display())]
    ConfigNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The node configuration file is not valid JSON of the expected shape.
    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        /// The offending file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Generator settings could not be read or parsed.
    #[error("Settings error: {0}")]
    Settings(String),

    /// A color string was not a `#rrggbb` hex triple.
    #[error("Invalid color '{0}'. Expected #rrggbb")]
    InvalidColor(String),

    /// An output path would escape the output root.
    #[error("Refusing to write outside the output root: {0}")]
    UnsafeOutputPath(String),

    /// Two specs in one batch target the same file.
    #[error("Duplicate output path: {}", path.display())]
    DuplicateOutput {
        /// The path claimed more than once.
        path: PathBuf,
    },

    /// The output directory or file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    RenderWrite {
        /// The target file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The canvas could not be encoded as PNG.
    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        /// The target file.
        path: PathBuf,
        /// The underlying codec error.
        source: image::ImageError,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
