//! System health monitoring handlers.

use aide::axum::ApiRouter;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::Monitor;
use crate::service::ServiceState;

/// Reports liveness of the service.
///
/// The endpoint carries no dependency checks: the OCR engine is a
/// subprocess spawned per request and the translation service is only
/// contacted on demand, so a responding process is a healthy process.
async fn health() -> Result<Json<Monitor>> {
    Ok(Json(Monitor {
        status: "healthy".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    }))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::get;

    ApiRouter::new().api_route("/health", get(health))
}
