//! Synthesis error types

use thiserror::Error;

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Synthesis-specific error types. Every variant carries the node path at
/// which synthesis failed.
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("No strategy for type {type_name} at {path}")]
    MissingStrategy { type_name: String, path: String },

    #[error("Container {type_name} at {path} has no declared element type; register a member override")]
    UnparameterizedContainer { type_name: String, path: String },

    #[error("Container type {type_name} at {path} recursively contains itself")]
    ContainerCycle { type_name: String, path: String },

    #[error("Unsupported map key type {type_name} at {path}")]
    UnsupportedKey { type_name: String, path: String },

    #[error("Enum {type_name} at {path} declares no constants")]
    EmptyEnum { type_name: String, path: String },

    #[error("Type resolution failed at {path}: {source}")]
    Resolution {
        path: String,
        #[source]
        source: burdock_core::Error,
    },
}
