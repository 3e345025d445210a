//! Application state with trait-object storage and media backends.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The image host is picked once at startup: the remote
//! host when credentials are configured, the local public directory
//! otherwise.

use std::{path::PathBuf, sync::Arc};

use dealboard_core::media::ImageHost;
use dealboard_core::storage::ListingStore;

use crate::{
    config::Config,
    media::{CloudinaryHost, LocalDiskHost},
    storage::PostgresListingStore,
};

/// Shared application state.
///
/// This is cloned for each request handler and carries the storage and
/// media backends as trait objects.
#[derive(Clone)]
pub struct AppState {
    /// Listing repository.
    pub store: Arc<dyn ListingStore>,
    /// Image placement backend, selected once at startup.
    pub image_host: Arc<dyn ImageHost>,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: u64,
    /// Directory where uploads are spooled before placement.
    pub upload_tmp_dir: PathBuf,
    /// Root of the publicly served asset tree.
    pub public_dir: PathBuf,
}

impl AppState {
    /// Creates a new AppState from already-built backends.
    fn build(
        store: Arc<dyn ListingStore>,
        image_host: Arc<dyn ImageHost>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            image_host,
            max_upload_bytes: config.max_upload_bytes,
            upload_tmp_dir: config.upload_tmp_dir.clone(),
            public_dir: config.public_dir.clone(),
        }
    }

    /// Creates AppState with Postgres storage and the configured image host.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let store = Arc::new(PostgresListingStore::new(&config.database_url).await?);

        let image_host: Arc<dyn ImageHost> = match &config.cloudinary {
            Some(credentials) => {
                tracing::info!(cloud_name = %credentials.cloud_name, "Using remote image host");
                Arc::new(CloudinaryHost::new(credentials.clone()))
            }
            None => {
                tracing::info!(
                    public_dir = %config.public_dir.display(),
                    "No remote image host configured, storing uploads locally"
                );
                Arc::new(LocalDiskHost::new(config.public_dir.clone()))
            }
        };

        Ok(Self::build(store, image_host, config))
    }
}

// ============================================================================
// Test support - state constructors backed by in-memory storage
// ============================================================================

#[cfg(test)]
mod test_support {
    use std::path::Path;

    use super::*;
    use crate::storage::MemoryListingStore;

    impl AppState {
        /// Creates an AppState rooted at `dir`, with in-memory storage and
        /// local image placement under `dir`/public.
        pub fn rooted_at(dir: &Path) -> Self {
            Self {
                store: Arc::new(MemoryListingStore::new()),
                image_host: Arc::new(LocalDiskHost::new(dir.join("public"))),
                max_upload_bytes: 1024 * 1024,
                upload_tmp_dir: dir.join("uploads"),
                public_dir: dir.join("public"),
            }
        }

        /// Swaps the listing store.
        pub fn with_store(mut self, store: Arc<dyn ListingStore>) -> Self {
            self.store = store;
            self
        }

        /// Swaps the image host.
        pub fn with_image_host(mut self, image_host: Arc<dyn ImageHost>) -> Self {
            self.image_host = image_host;
            self
        }

        /// Caps the accepted upload size.
        pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
            self.max_upload_bytes = max_upload_bytes;
            self
        }
    }
}
