//! Persistence error types
//!
//! This module defines all error types that can occur while loading or saving
//! the deck collection.
//!
//! # Error Types
//!
//! - **`Sled`**: Errors from the underlying sled embedded database
//! - **`Decode`**: A stored deck record could not be deserialized
//! - **`Encode`**: A deck could not be serialized for storage
//! - **`Unavailable`**: The backend refused the operation
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),

    /// Represents a record decoding error
    #[error("Error while decoding deck record {position}: {source}")]
    Decode {
        position: u64,
        #[source]
        source: serde_json::Error,
    },

    /// Represents a record encoding error
    #[error("Error while encoding deck: {0}")]
    Encode(#[source] serde_json::Error),

    /// Backend is not usable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
