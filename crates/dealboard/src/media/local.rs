//! Local-disk image placement.
//!
//! Used when no remote host is configured: uploads are moved into the
//! public directory and served by the static file route.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use dealboard_core::media::{ImageHost, MediaError, Result, UploadedFile};

/// URL prefix under which locally placed uploads are served.
const PUBLIC_URL_PREFIX: &str = "/public/uploads";

/// Stores uploads under `{public_dir}/uploads`.
///
/// Filenames are the upload's millisecond timestamp plus the original
/// extension, so the returned URL has the form
/// `/public/uploads/{timestamp}{ext}`.
pub struct LocalDiskHost {
    public_dir: PathBuf,
}

impl LocalDiskHost {
    /// Creates a host rooted at the given public directory.
    pub fn new(public_dir: PathBuf) -> Self {
        Self { public_dir }
    }
}

#[async_trait]
impl ImageHost for LocalDiskHost {
    async fn publish(&self, file: &UploadedFile) -> Result<String> {
        let uploads_dir = self.public_dir.join("uploads");
        tokio::fs::create_dir_all(&uploads_dir)
            .await
            .map_err(|e| MediaError::Placement(e.to_string()))?;

        let filename = format!(
            "{}{}",
            Utc::now().timestamp_millis(),
            file.extension_or_default()
        );
        let destination = uploads_dir.join(&filename);

        // Rename, not copy: the spool directory is expected to share a
        // filesystem with the public directory.
        tokio::fs::rename(&file.path, &destination)
            .await
            .map_err(|e| MediaError::Placement(e.to_string()))?;

        tracing::debug!(path = %destination.display(), "Stored upload locally");

        Ok(format!("{PUBLIC_URL_PREFIX}/{filename}"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;

    async fn spooled(dir: &Path, name: &str, bytes: &[u8]) -> UploadedFile {
        let path = dir.join("spool-0.tmp");
        tokio::fs::write(&path, bytes).await.unwrap();
        UploadedFile {
            path,
            original_name: name.to_string(),
            size: bytes.len() as u64,
        }
    }

    #[tokio::test]
    async fn test_publish_moves_file_into_public_uploads() {
        let dir = tempdir().unwrap();
        let file = spooled(dir.path(), "photo.png", b"png-bytes").await;
        let host = LocalDiskHost::new(dir.path().join("public"));

        let url = host.publish(&file).await.unwrap();

        assert!(url.starts_with("/public/uploads/"));
        assert!(url.ends_with(".png"));

        let filename = url.rsplit('/').next().unwrap();
        let stored = dir.path().join("public").join("uploads").join(filename);
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), b"png-bytes");

        // The spool file was consumed by the rename
        assert!(!file.path.exists());
    }

    #[tokio::test]
    async fn test_publish_defaults_extension_to_jpg() {
        let dir = tempdir().unwrap();
        let file = spooled(dir.path(), "photo", b"bytes").await;
        let host = LocalDiskHost::new(dir.path().join("public"));

        let url = host.publish(&file).await.unwrap();

        assert!(url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_filename_is_a_millisecond_timestamp() {
        let dir = tempdir().unwrap();
        let file = spooled(dir.path(), "photo.png", b"bytes").await;
        let host = LocalDiskHost::new(dir.path().join("public"));

        let before = Utc::now().timestamp_millis();
        let url = host.publish(&file).await.unwrap();
        let after = Utc::now().timestamp_millis();

        let stem = url
            .rsplit('/')
            .next()
            .unwrap()
            .strip_suffix(".png")
            .unwrap();
        let timestamp: i64 = stem.parse().unwrap();
        assert!(timestamp >= before && timestamp <= after);
    }

    #[tokio::test]
    async fn test_publish_fails_when_spool_file_is_gone() {
        let dir = tempdir().unwrap();
        let file = UploadedFile {
            path: dir.path().join("missing.tmp"),
            original_name: "photo.png".to_string(),
            size: 0,
        };
        let host = LocalDiskHost::new(dir.path().join("public"));

        let result = host.publish(&file).await;

        assert!(matches!(result, Err(MediaError::Placement(_))));
    }
}
