//! Processing service configuration.

use clap::Args;
use lector_engine::EngineConfig;
use lector_server::service::{RegistryConfig, UploadConfig};
use lector_translate::TranslateConfig;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Configuration for the document processing services.
///
/// Groups the OCR engine, the translation client, the task registry, and
/// upload concurrency limits.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Text extraction engine configuration.
    #[clap(flatten)]
    pub engine: EngineConfig,

    /// Translation service client configuration.
    #[clap(flatten)]
    pub translate: TranslateConfig,

    /// In-memory task registry configuration.
    #[clap(flatten)]
    pub registry: RegistryConfig,

    /// Upload concurrency configuration.
    #[clap(flatten)]
    pub upload: UploadConfig,
}

impl ServiceConfig {
    /// Logs service configuration at info level (no credentials).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            engine_path = %self.engine.engine_path,
            languages = %self.engine.languages,
            recognition_timeout_secs = self.engine.timeout_seconds,
            render_dpi = self.engine.render_dpi,
            "engine configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            translate_base_url = %self.translate.base_url,
            translate_timeout_secs = self.translate.timeout_seconds,
            "translation configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            task_capacity = self.registry.task_capacity,
            task_ttl_secs = self.registry.task_ttl_seconds,
            max_concurrent_uploads = self.upload.max_concurrent_uploads,
            max_upload_bytes = self.upload.max_file_size,
            "task registry configuration"
        );
    }
}
