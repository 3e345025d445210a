mod error;
mod traits;
mod types;

pub use error::{MediaError, Result};
pub use traits::ImageHost;
pub use types::UploadedFile;
