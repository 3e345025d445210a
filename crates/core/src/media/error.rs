use thiserror::Error;

/// Errors that can occur while placing an uploaded image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The remote host answered with a non-success status.
    #[error("Host rejected upload: {0}")]
    HostRejected(String),
    /// The remote host could not be reached at all.
    #[error("Host unreachable: {0}")]
    HostUnreachable(String),
    /// Reading, moving or writing the file failed.
    #[error("Placement failed: {0}")]
    Placement(String),
}

/// Result type for image placement operations.
pub type Result<T> = std::result::Result<T, MediaError>;
