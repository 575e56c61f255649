//! Translation response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response payload carrying the translated text.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Translation {
    /// Translated text in the requested target language.
    pub translation: String,
}
