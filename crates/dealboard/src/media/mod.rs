//! Image placement backends.
//!
//! This module provides concrete implementations of the `ImageHost` trait
//! defined in `dealboard_core::media`. Which one serves a running instance
//! is decided once at startup from the configured credentials.

mod cloudinary;
mod local;

pub use cloudinary::CloudinaryHost;
pub use local::LocalDiskHost;
