//! Upload concurrency configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

#[cfg(feature = "config")]
use clap::Args;

/// Default maximum concurrent uploads.
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: usize = 4;

/// Default maximum uploaded file size: 16MB.
pub const DEFAULT_MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for document upload processing.
///
/// Recognition runs the OCR engine as a subprocess per upload, so the
/// number of uploads processed at once is capped with a semaphore. The
/// file size cap bounds how much of one upload is buffered in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct UploadConfig {
    /// Maximum number of uploads processed simultaneously.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "UPLOAD_MAX_CONCURRENT", default_value_t = DEFAULT_MAX_CONCURRENT_UPLOADS)
    )]
    pub max_concurrent_uploads: usize,

    /// Maximum uploaded file size in bytes.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "UPLOAD_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)
    )]
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_uploads: DEFAULT_MAX_CONCURRENT_UPLOADS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadConfig {
    /// Creates a new upload configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum concurrent uploads.
    pub fn with_max_concurrent_uploads(mut self, max_concurrent_uploads: usize) -> Self {
        self.max_concurrent_uploads = max_concurrent_uploads;
        self
    }

    /// Sets the maximum uploaded file size in bytes.
    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Creates a semaphore for limiting concurrent upload processing.
    pub fn create_semaphore(&self) -> Arc<Semaphore> {
        Arc::new(Semaphore::new(self.max_concurrent_uploads))
    }
}
