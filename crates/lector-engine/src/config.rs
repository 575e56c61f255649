//! Extraction engine configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the text extraction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct EngineConfig {
    /// Path to the text recognition engine binary.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OCR_ENGINE_PATH", default_value = "tesseract")
    )]
    pub engine_path: String,

    /// Language set passed to the recognition engine.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OCR_LANGUAGES", default_value = "eng")
    )]
    pub languages: String,

    /// Upper bound in seconds for a single recognition run.
    #[cfg_attr(
        feature = "config",
        arg(
            id = "ocr_timeout_seconds",
            long = "ocr-timeout-seconds",
            env = "OCR_TIMEOUT_SECONDS",
            default_value_t = 120
        )
    )]
    pub timeout_seconds: u64,

    /// Resolution in dots per inch used when rasterizing PDF pages.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "PDF_RENDER_DPI", default_value_t = 200)
    )]
    pub render_dpi: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_path: "tesseract".to_owned(),
            languages: "eng".to_owned(),
            timeout_seconds: 120,
            render_dpi: 200,
        }
    }
}

impl EngineConfig {
    /// Returns the recognition timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.engine_path.trim().is_empty() {
            return Err(Error::invalid_config("engine path must not be empty"));
        }

        if self.languages.trim().is_empty() {
            return Err(Error::invalid_config("engine language set must not be empty"));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(Error::invalid_config(format!(
                "recognition timeout must be between 1 and 600 seconds, got {}",
                self.timeout_seconds
            )));
        }

        if !(72..=600).contains(&self.render_dpi) {
            return Err(Error::invalid_config(format!(
                "render resolution must be between 72 and 600 dpi, got {}",
                self.render_dpi
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_engine_path() {
        let config = EngineConfig {
            engine_path: "  ".to_owned(),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = EngineConfig {
            timeout_seconds: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_resolution() {
        let too_low = EngineConfig {
            render_dpi: 30,
            ..EngineConfig::default()
        };
        let too_high = EngineConfig {
            render_dpi: 1200,
            ..EngineConfig::default()
        };

        assert!(too_low.validate().is_err());
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn timeout_converts_to_duration() {
        let config = EngineConfig {
            timeout_seconds: 45,
            ..EngineConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(45));
    }
}
