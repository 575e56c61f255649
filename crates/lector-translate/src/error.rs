//! Error types for lector-translate.

/// Result type for all translation operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for translation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client/connection errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Translation service error response
    #[error("translation service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create an API error from a service response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Get a user-friendly error message suitable for display.
    ///
    /// Service response bodies and connection details stay in logs; this is
    /// the text that may be shown to API clients.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(err) if err.is_timeout() => {
                "The translation service did not respond in time.".to_string()
            }
            Error::Http(_) => {
                "Could not reach the translation service. Please try again later.".to_string()
            }
            Error::Api { status, .. } => {
                format!("The translation service rejected the request (status {status}).")
            }
            Error::UrlParse(_) | Error::InvalidConfig { .. } => {
                "The translation service is misconfigured.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_user_message_hides_response_body() {
        let error = Error::api_error(500, "java.lang.NullPointerException at line 42");
        let message = error.user_message();

        assert!(message.contains("500"));
        assert!(!message.contains("NullPointerException"));
    }

    #[test]
    fn display_includes_status_and_message() {
        let error = Error::api_error(429, "slow down");
        assert_eq!(
            error.to_string(),
            "translation service error: 429 - slow down"
        );
    }
}
