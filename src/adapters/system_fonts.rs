//! Filesystem adapter for the `FontSource` port.

use std::path::Path;

use crate::ports::FontSource;

/// Reads fonts straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFonts;

impl FontSource for SystemFonts {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_does_not_exist() {
        assert!(!SystemFonts.exists(Path::new("/nonexistent/font.ttf")));
        assert!(SystemFonts.read(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn reads_existing_file() {
        let dir = std::env::temp_dir().join("slidegen_system_fonts_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fake.ttf");
        std::fs::write(&path, b"not really a font").unwrap();

        assert!(SystemFonts.exists(&path));
        assert_eq!(SystemFonts.read(&path).unwrap(), b"not really a font");
        assert!(!SystemFonts.exists(&dir));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
