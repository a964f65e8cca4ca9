//! Unified error type for the plugin.
//!
//! Storage failures surface once as [`Error::Database`] or [`Error::Storage`];
//! a missing record is never an error.

use thiserror::Error;

/// Errors raised by the plugin and its stores.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    /// A language pack could not be read or parsed
    #[error("Language pack error: {message}")]
    Strings {
        /// Human-readable reason
        message: String,
    },

    /// Underlying database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A write completed without producing a usable record
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable reason
        message: String,
    },

    /// A group-attributed submission referenced a group that does not exist
    #[error("Group not found: {id}")]
    GroupNotFound {
        /// The group id that could not be resolved
        id: i64,
    },

    /// A name did not match any catalogue field
    #[error("Unknown field: {name}")]
    UnknownField {
        /// The rejected name
        name: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
