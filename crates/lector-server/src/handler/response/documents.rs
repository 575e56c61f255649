//! Document upload response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response payload returned after a document upload completes.
///
/// The identifier can be used with the progress endpoint to retrieve
/// the stored task record.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadedTask {
    /// Unique identifier of the created task.
    pub task_id: Uuid,
}
