//! Translation seam consumed by the HTTP layer.

use async_trait::async_trait;

use crate::client::TranslateClient;
use crate::error::Result;

/// Translates text into a target language.
///
/// The source language is never supplied; the backing service detects it
/// from the text. Failures propagate directly, with no retry and no
/// fallback translation.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translates `text` into the language named by `target_lang`.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

#[async_trait]
impl TranslationProvider for TranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        self.request_translation(text, target_lang).await
    }
}
