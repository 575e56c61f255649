//! Error types for lector-engine.
//!
//! Covers the failure taxonomy of the extraction pipeline: unsupported
//! content types, undecodable input bytes, recognition engine failures,
//! and timeouts.

use std::time::Duration;

/// Result type for all extraction operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for text extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Content type outside the supported set
    #[error("unsupported file type '{content_type}'")]
    UnsupportedFileType { content_type: String },

    /// Input bytes could not be decoded as the declared type
    #[error("failed to decode document: {reason}")]
    Decode { reason: String },

    /// The recognition engine reported a failure
    #[error("text recognition failed: {reason}")]
    Recognition { reason: String },

    /// A recognition run exceeded the allowed duration
    #[error("recognition timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Invalid engine configuration
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Generic operation error with context
    #[error("engine operation failed: {operation} - {details}")]
    Operation { operation: String, details: String },
}

impl Error {
    /// Create an unsupported file type error
    pub fn unsupported_file_type(content_type: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            content_type: content_type.into(),
        }
    }

    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Create a recognition error
    pub fn recognition(reason: impl Into<String>) -> Self {
        Self::Recognition {
            reason: reason.into(),
        }
    }

    /// Create a timeout error with the given duration
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { timeout: duration }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an operation error with context
    pub fn operation(op: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Operation {
            operation: op.into(),
            details: details.into(),
        }
    }

    /// Get a user-friendly error message suitable for display.
    ///
    /// Raw engine output and library error strings stay in logs; this is the
    /// text that may be shown to API clients.
    pub fn user_message(&self) -> String {
        match self {
            Error::UnsupportedFileType { content_type } => {
                format!(
                    "Unsupported file type '{}'. Please upload an image or a PDF document.",
                    content_type
                )
            }
            Error::Decode { .. } => {
                "The uploaded file could not be read. Please check that it is a valid image or PDF."
                    .to_string()
            }
            Error::Recognition { .. } => {
                "Text recognition failed while processing the document.".to_string()
            }
            Error::Timeout { timeout } => {
                format!(
                    "Text recognition timed out after {:?}. Please try again with a smaller document.",
                    timeout
                )
            }
            Error::InvalidConfig { reason } => format!("Configuration error: {}", reason),
            Error::Operation { .. } => {
                "An unexpected error occurred while processing the document.".to_string()
            }
        }
    }
}
