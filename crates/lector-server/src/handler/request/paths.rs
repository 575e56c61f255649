//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for task-level operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TaskPathParams {
    /// Unique identifier of the task.
    pub task_id: Uuid,
}
