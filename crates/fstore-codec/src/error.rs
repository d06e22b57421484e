use thiserror::Error;

/// Errors produced while encoding or decoding a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value cannot be represented in this encoding.
    #[error("{encoding} encode error: {message}")]
    Encode {
        encoding: &'static str,
        message: String,
    },

    /// The bytes are not a valid encoding of the requested type.
    #[error("{encoding} decode error: {message}")]
    Decode {
        encoding: &'static str,
        message: String,
    },
}

impl CodecError {
    pub(crate) fn encode(encoding: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            encoding,
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(encoding: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            encoding,
            message: err.to_string(),
        }
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
