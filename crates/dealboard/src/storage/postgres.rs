//! Postgres implementation of the listing store.
//!
//! The `listings` table is created on construction if it does not already
//! exist, so a fresh database works without a separate migration step.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use dealboard_core::listing::{Listing, NewListing};
use dealboard_core::storage::{ListingStore, Result, StoreError};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS listings (
    id          SERIAL PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    price       TEXT,
    contact     TEXT,
    image_url   TEXT,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const INSERT_LISTING: &str = "
INSERT INTO listings (name, description, price, contact, image_url)
VALUES ($1, $2, $3, $4, $5)
RETURNING id, name, description, price, contact, image_url, created_at";

const SELECT_LISTING_BY_ID: &str = "
SELECT id, name, description, price, contact, image_url, created_at
FROM listings WHERE id = $1";

const SELECT_RECENT_LISTINGS: &str = "
SELECT id, name, description, price, contact, image_url, created_at
FROM listings ORDER BY created_at DESC LIMIT $1";

const SELECT_ALL_LISTINGS: &str = "
SELECT id, name, description, price, contact, image_url, created_at
FROM listings ORDER BY created_at DESC";

/// Row shape shared by all listing queries.
#[derive(sqlx::FromRow)]
struct ListingRow {
    id: i32,
    name: String,
    description: Option<String>,
    price: Option<String>,
    contact: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            contact: row.contact,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed listing store.
pub struct PostgresListingStore {
    pool: PgPool,
}

impl PostgresListingStore {
    /// Connects to the database and ensures the schema exists.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ListingStore for PostgresListingStore {
    async fn insert(&self, listing: &NewListing) -> Result<Listing> {
        let row = sqlx::query_as::<_, ListingRow>(INSERT_LISTING)
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(&listing.price)
            .bind(&listing.contact)
            .bind(&listing.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(row.into())
    }

    async fn get(&self, id: i32) -> Result<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(SELECT_LISTING_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(SELECT_RECENT_LISTINGS)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(SELECT_ALL_LISTINGS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
