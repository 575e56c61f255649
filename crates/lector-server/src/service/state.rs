//! Application state and dependency injection.

use std::sync::Arc;

use lector_engine::OcrEngine;
use lector_translate::TranslationProvider;
use tokio::sync::Semaphore;

use crate::service::{TaskRegistry, UploadConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    engine: OcrEngine,
    translator: Arc<dyn TranslationProvider>,
    task_registry: TaskRegistry,
    upload_config: UploadConfig,
    upload_permits: Arc<Semaphore>,
}

impl ServiceState {
    /// Creates application state from its assembled parts.
    ///
    /// The engine and translator are constructed by the caller so that
    /// tests can substitute stub implementations. The upload semaphore is
    /// derived from the upload configuration.
    pub fn new(
        engine: OcrEngine,
        translator: Arc<dyn TranslationProvider>,
        task_registry: TaskRegistry,
        upload_config: UploadConfig,
    ) -> Self {
        let upload_permits = upload_config.create_semaphore();

        Self {
            engine,
            translator,
            task_registry,
            upload_config,
            upload_permits,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(engine: OcrEngine);
impl_di!(translator: Arc<dyn TranslationProvider>);
impl_di!(task_registry: TaskRegistry);
impl_di!(upload_config: UploadConfig);
impl_di!(upload_permits: Arc<Semaphore>);
