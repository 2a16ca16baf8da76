//! Store-specific error types
//!
//! This module defines all error types that can occur during item store operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing items from the store
//! - **`EncodeError`**: Failures when serializing items to the store
//! - **`SerializeError`**: Malformed keys (e.g., a sequence key of the wrong length)
//! - **`ItemNotFound`**: An operation targeted an id the store does not hold
//! - **`InvalidInput`**: Malformed input, such as an unreadable items document

use thiserror::Error;

/// Item store errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// No item with this id is stored
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
