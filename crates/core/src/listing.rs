use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published listing with its store-assigned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Store-assigned, unique and immutable.
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Free-form price text, not validated or parsed.
    pub price: Option<String>,
    pub contact: Option<String>,
    /// Either an absolute remote URL or a local `/public/uploads/` path.
    pub image_url: Option<String>,
    /// Assigned by the store at insert time, never updated.
    pub created_at: DateTime<Utc>,
}

/// Fields of a submission before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewListing {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub contact: Option<String>,
    pub image_url: Option<String>,
}

impl NewListing {
    /// Creates a new listing submission with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price: None,
            contact: None,
            image_url: None,
        }
    }

    /// Sets the description for this submission.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the price text for this submission.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Sets the contact details for this submission.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Sets the image URL for this submission.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
