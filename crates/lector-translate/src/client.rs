//! Translation service client.

use reqwest::{Client as HttpClient, ClientBuilder};
use serde::{Deserialize, Serialize};

use crate::config::TranslateConfig;
use crate::error::{Error, Result};

const TRACING_TARGET: &str = "lector_translate::client";

/// User agent sent with every translation request.
const USER_AGENT: &str = concat!("lector-translate/", env!("CARGO_PKG_VERSION"));

/// Client for a LibreTranslate-compatible translation service.
///
/// The underlying HTTP client pools connections, so this type is cheap to
/// clone and share across handlers.
#[derive(Debug, Clone)]
pub struct TranslateClient {
    http_client: HttpClient,
    config: TranslateConfig,
}

/// Wire format of a translation request.
///
/// The source language is always `auto`: the service detects it from the
/// text itself.
#[derive(Debug, Serialize)]
struct TranslateRequestBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Wire format of a translation response.
#[derive(Debug, Deserialize)]
struct TranslateResponseBody {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl TranslateClient {
    /// Create a new translation client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: TranslateConfig) -> Result<Self> {
        config.validate()?;

        let http_client = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Perform a health check against the translation service.
    ///
    /// Issues a `GET /languages` request, the cheapest endpoint a
    /// LibreTranslate-compatible service exposes, and reports whether it
    /// answered with a success status.
    pub async fn health_check(&self) -> Result<()> {
        let url = self.config.base_url.join("/languages")?;

        tracing::debug!(target: TRACING_TARGET, "performing health check");

        let response = self.http_client.get(url).send().await.map_err(|err| {
            tracing::warn!(target: TRACING_TARGET, error = %err, "health check request failed");
            Error::Http(err)
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(
                target: TRACING_TARGET,
                status,
                "health check returned an error status"
            );
            return Err(Error::api_error(status, "health check failed"));
        }

        Ok(())
    }

    pub(crate) async fn request_translation(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<String> {
        let url = self.config.base_url.join("/translate")?;

        let body = TranslateRequestBody {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            target_lang,
            text_length = text.len(),
            "requesting translation"
        );

        let response = self
            .http_client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(target: TRACING_TARGET, error = %err, "translation request failed");
                Error::Http(err)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());

            tracing::error!(
                target: TRACING_TARGET,
                status,
                message,
                "translation service returned an error"
            );

            return Err(Error::api_error(status, message));
        }

        let body: TranslateResponseBody = response.json().await.map_err(Error::Http)?;

        Ok(body.translated_text)
    }
}
