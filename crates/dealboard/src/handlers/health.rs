//! Health check endpoint.

/// GET /healthz - Basic liveness probe.
///
/// Returns a fixed body immediately. Does NOT touch the store or the
/// image host.
#[axum::debug_handler]
pub async fn healthz() -> &'static str {
    "OK"
}
