//! In-memory listing store for tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use dealboard_core::listing::{Listing, NewListing};
use dealboard_core::storage::{ListingStore, Result};

/// In-memory storage backend for testing.
///
/// Rows live in a `RwLock<Vec<_>>` in insertion order, with ids assigned
/// sequentially. Data is lost when the store is dropped.
#[derive(Debug)]
pub struct MemoryListingStore {
    rows: RwLock<Vec<Listing>>,
}

impl Default for MemoryListingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryListingStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn insert(&self, listing: &NewListing) -> Result<Listing> {
        let mut rows = self.rows.write().await;
        let listing = Listing {
            id: rows.len() as i32 + 1,
            name: listing.name.clone(),
            description: listing.description.clone(),
            price: listing.price.clone(),
            contact: listing.contact.clone(),
            image_url: listing.image_url.clone(),
            created_at: Utc::now(),
        };
        rows.push(listing.clone());
        Ok(listing)
    }

    async fn get(&self, id: i32) -> Result<Option<Listing>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|listing| listing.id == id).cloned())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Listing>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().rev().take(limit as usize).cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<Listing>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryListingStore::new();

        let first = store.insert(&NewListing::new("Bike")).await.unwrap();
        let second = store.insert(&NewListing::new("Lamp")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_returns_inserted_listing() {
        let store = MemoryListingStore::new();
        let inserted = store
            .insert(&NewListing::new("Bike").with_price("50"))
            .await
            .unwrap();

        let found = store.get(inserted.id).await.unwrap();

        assert_eq!(found, Some(inserted));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryListingStore::new();

        assert_eq!(store.get(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let store = MemoryListingStore::new();
        for name in ["first", "second", "third"] {
            store.insert(&NewListing::new(name)).await.unwrap();
        }

        let recent = store.recent(2).await.unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "third");
        assert_eq!(recent[1].name, "second");
    }

    #[tokio::test]
    async fn test_list_all_is_newest_first() {
        let store = MemoryListingStore::new();
        for name in ["first", "second", "third"] {
            store.insert(&NewListing::new(name)).await.unwrap();
        }

        let all = store.list_all().await.unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "third");
        assert_eq!(all[2].name, "first");
    }
}
