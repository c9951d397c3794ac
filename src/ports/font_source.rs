//! Font source port: where candidate font files are looked up.

use std::path::Path;

/// Reads font files by path.
///
/// The generator only ever asks for whole files, so a fake can serve bytes
/// from memory without touching the real filesystem.
pub trait FontSource {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}
