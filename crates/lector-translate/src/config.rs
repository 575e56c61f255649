//! Translation client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Configuration for the translation service client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct TranslateConfig {
    /// Base URL of the translation service.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TRANSLATE_BASE_URL", default_value = "http://localhost:5000")
    )]
    pub base_url: Url,

    /// API key sent with every translation request, if the service requires one.
    #[cfg_attr(feature = "config", arg(long, env = "TRANSLATE_API_KEY"))]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(
            id = "translate_timeout_seconds",
            long = "translate-timeout-seconds",
            env = "TRANSLATE_TIMEOUT_SECONDS",
            default_value_t = 30
        )
    )]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(
            id = "translate_connect_timeout_seconds",
            long = "translate-connect-timeout-seconds",
            env = "TRANSLATE_CONNECT_TIMEOUT_SECONDS",
            default_value_t = 10
        )
    )]
    pub connect_timeout_seconds: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:5000").expect("default URL is valid"),
            api_key: None,
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }
}

impl TranslateConfig {
    /// Returns the request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns the connection timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "base URL must use http or https, got '{}'",
                self.base_url.scheme()
            )));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(Error::invalid_config(format!(
                "request timeout must be between 1 and 300 seconds, got {}",
                self.timeout_seconds
            )));
        }

        if self.connect_timeout_seconds == 0 || self.connect_timeout_seconds > 60 {
            return Err(Error::invalid_config(format!(
                "connection timeout must be between 1 and 60 seconds, got {}",
                self.connect_timeout_seconds
            )));
        }

        Ok(())
    }
}
