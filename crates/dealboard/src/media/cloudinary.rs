//! Remote image host client for the Cloudinary upload API.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use dealboard_core::media::{ImageHost, MediaError, Result, UploadedFile};

use crate::config::CloudinaryConfig;

/// Production endpoint for the upload API.
const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Folder uploads are grouped under on the remote host.
const UPLOAD_FOLDER: &str = "dealboard_uploads";

/// Client for the Cloudinary image upload API.
///
/// Uploads keep the original filename as a naming hint and do not ask the
/// host to uniquify it. Requests carry a SHA-1 signature over the upload
/// parameters, per the provider's legacy authentication scheme.
pub struct CloudinaryHost {
    client: reqwest::Client,
    base_url: String,
    credentials: CloudinaryConfig,
}

/// The one response field the pipeline stores.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryHost {
    /// Creates a client against the production API.
    pub fn new(credentials: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: CLOUDINARY_API_BASE.to_string(),
            credentials,
        }
    }

    /// Creates a client against an arbitrary endpoint, for tests.
    #[cfg(test)]
    pub(crate) fn with_base_url(
        credentials: CloudinaryConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.base_url, self.credentials.cloud_name
        )
    }

    /// Signs the upload parameters.
    ///
    /// The signature is the hex SHA-1 of the alphabetically sorted
    /// `key=value` pairs joined by `&`, with the API secret appended.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let digest = ring::digest::digest(
            &ring::digest::SHA1_FOR_LEGACY_USE_ONLY,
            format!("{joined}{}", self.credentials.api_secret).as_bytes(),
        );
        hex::encode(digest.as_ref())
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn publish(&self, file: &UploadedFile) -> Result<String> {
        let timestamp = Utc::now().timestamp().to_string();

        let params = [
            ("folder", UPLOAD_FOLDER),
            ("timestamp", timestamp.as_str()),
            ("unique_filename", "false"),
            ("use_filename", "true"),
        ];
        let signature = self.sign(&params);

        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| MediaError::Placement(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file.original_name.clone()),
            )
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", UPLOAD_FOLDER)
            .text("unique_filename", "false")
            .text("use_filename", "true")
            .text("signature", signature);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::HostUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "Remote image host rejected upload");
            return Err(MediaError::HostRejected(format!("{status}: {body}")));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::HostRejected(e.to_string()))?;

        tracing::debug!(url = %upload.secure_url, "Stored upload remotely");

        Ok(upload.secure_url)
    }
}
