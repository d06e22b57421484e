use thiserror::Error;

/// Errors produced when a key or value is rejected before any I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("value for key {key:?} must not be nil")]
    NilValue { key: String },

    #[error("unknown store type: {0}")]
    UnknownStoreType(String),
}
