//! Core domain types for dealboard.
//!
//! Holds the listing model and the traits the application crate implements
//! for persistence and image placement. No I/O happens here.

pub mod listing;
pub mod media;
pub mod storage;
