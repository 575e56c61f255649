//! Application state and dependency injection.

mod registry;
mod state;
mod upload;

pub use crate::service::registry::{
    DEFAULT_TASK_CAPACITY, DEFAULT_TASK_TTL_SECONDS, RegistryConfig, TaskRegistry,
};
pub use crate::service::state::ServiceState;
pub use crate::service::upload::{
    DEFAULT_MAX_CONCURRENT_UPLOADS, DEFAULT_MAX_FILE_SIZE, UploadConfig,
};
