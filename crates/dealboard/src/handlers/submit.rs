//! Listing submission pipeline (POST /add).
//!
//! A submission moves through: read the form, place the optional image,
//! insert the record, clean up the spool file. An image or store failure
//! aborts the submission with no record written; the spool file is always
//! cleaned up best-effort, whatever the outcome.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use dealboard_core::listing::{Listing, NewListing};
use dealboard_core::media::MediaError;
use dealboard_core::storage::StoreError;

use crate::{
    state::AppState,
    upload::{self, SubmissionForm, UploadError},
};

/// Errors terminating a submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Name is required")]
    MissingName,
    #[error("{0}")]
    Upload(#[from] UploadError),
    #[error("Image placement failed: {0}")]
    Image(MediaError),
    #[error("Store failed: {0}")]
    Store(StoreError),
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match &self {
            SubmitError::MissingName => StatusCode::BAD_REQUEST,
            SubmitError::Upload(UploadError::Malformed(_)) => StatusCode::BAD_REQUEST,
            SubmitError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(status = %status, error = %self, "Submission failed");

        // Client errors explain themselves; server errors keep the cause in
        // the log and answer with a fixed body.
        let body = if status.is_server_error() {
            "Upload failed".to_string()
        } else {
            self.to_string()
        };

        (status, body).into_response()
    }
}

/// Handler for listing submissions (POST /add).
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, SubmitError> {
    let form =
        upload::read_submission(multipart, &state.upload_tmp_dir, state.max_upload_bytes).await?;

    let outcome = place_and_persist(&state, &form).await;

    if let Some(file) = &form.file {
        file.discard().await;
    }

    let listing = outcome?;
    tracing::info!(id = listing.id, name = %listing.name, "Listing created");

    Ok(Redirect::to("/items"))
}

/// Places the image (if any) and inserts the record.
async fn place_and_persist(
    state: &AppState,
    form: &SubmissionForm,
) -> Result<Listing, SubmitError> {
    if form.name.trim().is_empty() {
        return Err(SubmitError::MissingName);
    }

    let image_url = match &form.file {
        Some(file) => Some(
            state
                .image_host
                .publish(file.as_file())
                .await
                .map_err(SubmitError::Image)?,
        ),
        None => None,
    };

    let listing = NewListing {
        name: form.name.trim().to_string(),
        description: form.description.clone(),
        price: form.price.clone(),
        contact: form.contact.clone(),
        image_url,
    };

    state.store.insert(&listing).await.map_err(SubmitError::Store)
}
