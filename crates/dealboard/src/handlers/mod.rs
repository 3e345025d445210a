pub mod error;
pub mod health;
pub mod pages;
pub mod submit;

pub use error::AppError;
