//! Error types for Burdock Core

use thiserror::Error;

/// Result type alias using Burdock's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Burdock core error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Member not found: {type_name}.{member}")]
    MemberNotFound { type_name: String, member: String },

    #[error("Cannot resolve segment '{segment}' of path '{path}': {reason}")]
    PathResolution {
        path: String,
        segment: String,
        reason: String,
    },

    #[error("Not a record: {0}")]
    NotARecord(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
