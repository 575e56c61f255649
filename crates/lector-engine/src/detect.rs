//! Language identification for extracted text.

use lector_core::{DEFAULT_LANGUAGE, to_iso639_1};

const TRACING_TARGET: &str = "lector_engine::detect";

/// Identifies the language of extracted text.
///
/// Empty or whitespace-only text never reaches the detector; it yields the
/// fixed default code directly, since detection on empty input is undefined.
/// When the detector abstains, the default code is returned as well. Detected
/// languages are reported as two-letter ISO 639-1 codes where one exists,
/// falling back to the detector's native three-letter code otherwise.
pub fn detect_language(text: &str) -> String {
    if text.trim().is_empty() {
        return DEFAULT_LANGUAGE.to_owned();
    }

    match whatlang::detect_lang(text) {
        Some(lang) => {
            let code = lang.code();
            to_iso639_1(code).unwrap_or(code).to_owned()
        }
        None => {
            tracing::debug!(
                target: TRACING_TARGET,
                length = text.len(),
                "language detection abstained, falling back to default"
            );
            DEFAULT_LANGUAGE.to_owned()
        }
    }
}
