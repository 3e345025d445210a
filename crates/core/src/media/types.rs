use std::path::{Path, PathBuf};

/// An uploaded file spooled to a temporary location on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Where the bytes were spooled.
    pub path: PathBuf,
    /// Filename as submitted by the client.
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
}

impl UploadedFile {
    /// Extension of the client-supplied filename, including the dot.
    ///
    /// Falls back to `.jpg` when the name has no extension.
    pub fn extension_or_default(&self) -> String {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| ".jpg".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_named(name: &str) -> UploadedFile {
        UploadedFile {
            path: PathBuf::from("/tmp/spool-0.tmp"),
            original_name: name.to_string(),
            size: 0,
        }
    }

    #[test]
    fn test_extension_is_taken_from_the_original_name() {
        assert_eq!(file_named("photo.png").extension_or_default(), ".png");
        assert_eq!(file_named("archive.tar.gz").extension_or_default(), ".gz");
        assert_eq!(file_named("PHOTO.JPG").extension_or_default(), ".JPG");
    }

    #[test]
    fn test_extension_defaults_to_jpg() {
        assert_eq!(file_named("photo").extension_or_default(), ".jpg");
        assert_eq!(file_named(".hidden").extension_or_default(), ".jpg");
    }
}
