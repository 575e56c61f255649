//! Health monitoring response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response payload for the liveness probe.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Monitor {
    /// Service status, always `healthy` while the process serves requests.
    pub status: String,
    /// Version of the running server.
    pub version: String,
}
