//! Cart error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by the cart store and its consumer context.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart was used without an active store: either the consumer
    /// context holds no store, or the store has been closed.
    #[error("`{operation}` must be used within an active cart store")]
    NotActive {
        /// Operation the caller attempted.
        operation: &'static str,
    },

    /// The persistence service failed while loading the cart.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The background persistence writer is no longer running.
    #[error("Persistence writer stopped")]
    WriterStopped,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_active_names_the_operation() {
        let err = CartError::NotActive {
            operation: "increment",
        };
        assert_eq!(
            err.to_string(),
            "`increment` must be used within an active cart store"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: CartError = StorageError::Backend("disk full".to_string()).into();
        assert!(matches!(err, CartError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: storage backend error: disk full");
    }
}
