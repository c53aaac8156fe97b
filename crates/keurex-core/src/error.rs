//! Centralized error types for Keurex.

use thiserror::Error;

/// Main error type for Keurex operations.
#[derive(Error, Debug)]
pub enum KeurexError {
    #[error("Assettype not found: {short_uri} (candidates: {candidates})")]
    AssettypeNotFound {
        short_uri: String,
        candidates: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Keurex operations.
pub type KeurexResult<T> = Result<T, KeurexError>;
