use async_trait::async_trait;

use super::{Result, UploadedFile};

/// Destination for uploaded images.
///
/// Implementations place the file somewhere it can be served from and
/// return the public URL to store alongside the listing. Whether the spool
/// file is consumed is implementation-defined; callers clean up whatever
/// remains on a best-effort basis.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Places the uploaded file and returns its public URL.
    async fn publish(&self, file: &UploadedFile) -> Result<String>;
}
