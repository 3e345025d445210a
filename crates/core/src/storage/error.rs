use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_connection_failed_display() {
        let error = StoreError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_store_error_query_failed_display() {
        let error = StoreError::QueryFailed("relation \"listings\" does not exist".to_string());
        assert_eq!(
            error.to_string(),
            "Query failed: relation \"listings\" does not exist"
        );
    }
}
