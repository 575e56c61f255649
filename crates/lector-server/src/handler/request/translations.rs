//! Translation request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for translating a piece of text.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
pub struct TranslateRequest {
    /// Text to translate. The source language is detected upstream.
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,

    /// Target language code, e.g. `en` or `pt-BR`.
    #[validate(length(min = 2, max = 8))]
    pub target_lang: String,
}
