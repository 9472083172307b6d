//! Error types for comparisons

use thiserror::Error;

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;

/// Errors that can occur while comparing values
#[derive(Debug, Error)]
pub enum CompareError {
    /// The two operands differ; the message describes how
    #[error("{message}")]
    Mismatch { message: String },

    /// `compare` was not given exactly two operands
    #[error("Exactly two objects needed, you supplied:{supplied}")]
    Arguments { supplied: String },

    /// A value does not support an operation the comparison needs
    #[error("{type_name} does not support {operation}")]
    Unsupported {
        type_name: String,
        operation: &'static str,
    },

    /// A dotted type path could not be resolved
    #[error("could not resolve type '{path}'")]
    UnresolvedType { path: String },

    /// A string matcher was built from an invalid regular expression
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A serializable value could not be converted
    #[error("could not convert value: {0}")]
    Conversion(#[from] serde_json::Error),

    /// Raised by a user supplied comparer and passed through untouched
    #[error(transparent)]
    Comparer(Box<dyn std::error::Error + Send + Sync>),
}

impl CompareError {
    /// Wrap an error raised inside a custom comparer
    pub fn comparer(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Comparer(error.into())
    }

    /// The diff text when this error is a mismatch
    pub fn mismatch(&self) -> Option<&str> {
        match self {
            Self::Mismatch { message } => Some(message),
            _ => None,
        }
    }
}
