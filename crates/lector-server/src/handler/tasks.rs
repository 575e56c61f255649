//! Task progress handlers.
//!
//! Processing happens inline in the upload request, so by the time a
//! client can poll, the record is already terminal. The endpoint still
//! exists so late readers can retrieve the outcome, including failures
//! that were stored before the upload response went out.

use aide::axum::ApiRouter;
use axum::extract::State;
use lector_core::TaskRecord;

use crate::extract::{Json, Path};
use crate::handler::request::TaskPathParams;
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, TaskRegistry};

/// Tracing target for task progress operations.
const TRACING_TARGET: &str = "lector_server::handler::tasks";

/// Returns the current record for a task.
///
/// Unknown identifiers are reported as not found, never as a default
/// record. Expired and evicted records are indistinguishable from ids
/// that were never issued.
#[tracing::instrument(skip_all, fields(task_id = %params.task_id))]
async fn read_progress(
    State(task_registry): State<TaskRegistry>,
    Path(params): Path<TaskPathParams>,
) -> Result<Json<TaskRecord>> {
    let Some(record) = task_registry.get(params.task_id).await else {
        tracing::debug!(
            target: TRACING_TARGET,
            task_id = %params.task_id,
            "progress query for unknown task"
        );

        return Err(ErrorKind::NotFound
            .with_message("Task not found")
            .with_resource(params.task_id.to_string()));
    };

    Ok(Json(record))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::get;

    ApiRouter::new().api_route("/progress/{task_id}", get(read_progress))
}
