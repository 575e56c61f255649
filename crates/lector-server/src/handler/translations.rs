//! Text translation handlers.
//!
//! Translation is a direct passthrough to the upstream service: no task
//! record is created and no retry is attempted. The source language is
//! detected by the service itself.

use std::sync::Arc;

use aide::axum::ApiRouter;
use axum::extract::State;
use lector_translate::TranslationProvider;

use crate::extract::{Json, ValidateJson};
use crate::handler::request::TranslateRequest;
use crate::handler::response::Translation;
use crate::handler::{Error, Result};
use crate::service::ServiceState;

/// Tracing target for translation operations.
const TRACING_TARGET: &str = "lector_server::handler::translations";

/// Translates text into the requested target language.
#[tracing::instrument(skip_all, fields(target_lang = %request.target_lang))]
async fn translate_text(
    State(translator): State<Arc<dyn TranslationProvider>>,
    ValidateJson(request): ValidateJson<TranslateRequest>,
) -> Result<Json<Translation>> {
    let translation = translator
        .translate(&request.text, &request.target_lang)
        .await
        .map_err(|error| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                target_lang = %request.target_lang,
                "translation request failed"
            );
            Error::from(error)
        })?;

    tracing::debug!(
        target: TRACING_TARGET,
        source_length = request.text.len(),
        translated_length = translation.len(),
        "text translated"
    );

    Ok(Json(Translation { translation }))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::post;

    ApiRouter::new().api_route("/translate", post(translate_text))
}
