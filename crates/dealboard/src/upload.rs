//! Multipart form reading for listing submissions.
//!
//! The text fields are collected as-is (empty strings become None) and the
//! optional `image` part is streamed to a spool file under the configured
//! temp directory, enforcing the size cap while the bytes arrive.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::multipart::{Field, Multipart};
use chrono::Utc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use dealboard_core::media::UploadedFile;

static SPOOL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors from reading a submission form.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart stream could not be parsed.
    #[error("Invalid form data: {0}")]
    Malformed(String),
    /// The file exceeded the configured cap.
    #[error("File exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
    /// Writing the spool file failed.
    #[error("Failed to spool upload: {0}")]
    Spool(String),
}

/// A parsed submission form.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub contact: Option<String>,
    pub file: Option<TempUpload>,
}

/// A spooled upload awaiting placement.
#[derive(Debug)]
pub struct TempUpload {
    file: UploadedFile,
}

impl TempUpload {
    /// The spooled file.
    pub fn as_file(&self) -> &UploadedFile {
        &self.file
    }

    /// Removes the spool file if it is still present.
    ///
    /// Cleanup is best-effort: failures are logged at warn level and never
    /// change the submission outcome. A missing file is not a failure,
    /// since local placement consumes it.
    pub async fn discard(&self) {
        match tokio::fs::remove_file(&self.file.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.file.path.display(),
                    error = %e,
                    "Failed to remove spooled upload"
                );
            }
        }
    }
}

/// Reads a submission form, spooling the optional `image` part to `tmp_dir`.
///
/// A file part with an empty filename counts as no file, which is how
/// browsers submit an untouched file input. A file larger than `max_bytes`
/// aborts the read; the partial spool file is removed before returning.
/// An error later in the stream likewise removes an already spooled file,
/// so a failed read never leaves anything in `tmp_dir`.
pub async fn read_submission(
    multipart: Multipart,
    tmp_dir: &Path,
    max_bytes: u64,
) -> Result<SubmissionForm, UploadError> {
    let mut form = SubmissionForm::default();

    match read_fields(&mut form, multipart, tmp_dir, max_bytes).await {
        Ok(()) => Ok(form),
        Err(e) => {
            if let Some(file) = form.file.take() {
                file.discard().await;
            }
            Err(e)
        }
    }
}

/// Fills `form` from the multipart fields, spooling the `image` part.
async fn read_fields(
    form: &mut SubmissionForm,
    mut multipart: Multipart,
    tmp_dir: &Path,
    max_bytes: u64,
) -> Result<(), UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "name" => form.name = text_value(field).await?.unwrap_or_default(),
            "description" => form.description = text_value(field).await?,
            "price" => form.price = text_value(field).await?,
            "contact" => form.contact = text_value(field).await?,
            "image" => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                if original_name.is_empty() {
                    continue;
                }
                // Last file part wins; an earlier spool is discarded
                if let Some(previous) = form.file.take() {
                    previous.discard().await;
                }
                form.file = Some(spool(field, original_name, tmp_dir, max_bytes).await?);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Collects a text field, normalizing empty strings to None.
async fn text_value(field: Field<'_>) -> Result<Option<String>, UploadError> {
    let value = field
        .text()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?;

    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Streams a file field to a uniquely named spool file under `tmp_dir`.
async fn spool(
    mut field: Field<'_>,
    original_name: String,
    tmp_dir: &Path,
    max_bytes: u64,
) -> Result<TempUpload, UploadError> {
    tokio::fs::create_dir_all(tmp_dir)
        .await
        .map_err(|e| UploadError::Spool(e.to_string()))?;

    let path = spool_path(tmp_dir);
    let mut spool_file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| UploadError::Spool(e.to_string()))?;

    let mut written: u64 = 0;
    loop {
        let chunk = match field.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                drop(spool_file);
                remove_partial(&path).await;
                return Err(UploadError::Malformed(e.to_string()));
            }
        };

        written += chunk.len() as u64;
        if written > max_bytes {
            drop(spool_file);
            remove_partial(&path).await;
            return Err(UploadError::TooLarge { limit: max_bytes });
        }

        if let Err(e) = spool_file.write_all(&chunk).await {
            drop(spool_file);
            remove_partial(&path).await;
            return Err(UploadError::Spool(e.to_string()));
        }
    }

    if let Err(e) = spool_file.flush().await {
        drop(spool_file);
        remove_partial(&path).await;
        return Err(UploadError::Spool(e.to_string()));
    }

    Ok(TempUpload {
        file: UploadedFile {
            path,
            original_name,
            size: written,
        },
    })
}

/// A unique spool path; a timestamp plus counter keeps concurrent uploads
/// apart.
fn spool_path(tmp_dir: &Path) -> PathBuf {
    let n = SPOOL_COUNTER.fetch_add(1, Ordering::Relaxed);
    tmp_dir.join(format!("upload-{}-{n}.tmp", Utc::now().timestamp_millis()))
}

/// Removes an abandoned spool file, logging on failure.
async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial spool file");
    }
}
