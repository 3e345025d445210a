use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        health::healthz,
        pages::{about, add, index, item, items},
        submit::submit,
    },
    state::AppState,
};

/// Room on top of the file cap for the text fields and multipart framing,
/// so the cap in the upload reader decides, not the transport limit.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes as usize + BODY_LIMIT_SLACK;

    Router::new()
        .route("/", get(index))
        .route("/items", get(items))
        .route("/item/{id}", get(item))
        .route("/add", get(add).post(submit))
        .route("/about", get(about))
        .route("/healthz", get(healthz))
        .nest_service("/public", ServeDir::new(state.public_dir.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
