use async_trait::async_trait;

use crate::listing::{Listing, NewListing};

use super::Result;

/// Repository for listing records.
///
/// Listings are append-only: they are inserted once by a submission and
/// read by the listing and detail pages, never updated or deleted.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Inserts a new listing and returns it with its assigned id and timestamp.
    async fn insert(&self, listing: &NewListing) -> Result<Listing>;

    /// Gets a listing by its id.
    async fn get(&self, id: i32) -> Result<Option<Listing>>;

    /// Gets the most recent listings, newest first, at most `limit`.
    async fn recent(&self, limit: i64) -> Result<Vec<Listing>>;

    /// Gets all listings, newest first.
    async fn list_all(&self) -> Result<Vec<Listing>>;
}
