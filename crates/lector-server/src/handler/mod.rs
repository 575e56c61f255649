//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Three request surfaces: document upload, task progress lookup, and
//! text translation, plus a health probe. Routes are declared on aide's
//! [`ApiRouter`] so the OpenAPI document is generated from the same
//! definitions that serve traffic.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`ApiRouter`]: aide::axum::ApiRouter

mod documents;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod tasks;
mod translations;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes.
///
/// [`ApiRouter`]: aide::axum::ApiRouter
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(documents::routes())
        .merge(tasks::routes())
        .merge(translations::routes())
        .merge(monitors::routes())
        .fallback(fallback)
}

#[cfg(test)]
pub(crate) mod test {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use aide::axum::ApiRouter;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};
    use bytes::Bytes;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use lector_engine::{OcrEngine, PageRasterizer, TextRecognizer};
    use lector_translate::TranslationProvider;

    use crate::service::{RegistryConfig, ServiceState, TaskRegistry, UploadConfig};

    /// Recognizer that returns the same text for every page.
    pub struct FixedRecognizer(pub &'static str);

    #[async_trait]
    impl TextRecognizer for FixedRecognizer {
        async fn recognize(&self, _image: &DynamicImage) -> lector_engine::Result<String> {
            Ok(self.0.to_owned())
        }
    }

    /// Recognizer that labels pages in call order.
    #[derive(Default)]
    pub struct SequenceRecognizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextRecognizer for SequenceRecognizer {
        async fn recognize(&self, _image: &DynamicImage) -> lector_engine::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("page {call}"))
        }
    }

    /// Recognizer that always fails.
    pub struct FailingRecognizer;

    #[async_trait]
    impl TextRecognizer for FailingRecognizer {
        async fn recognize(&self, _image: &DynamicImage) -> lector_engine::Result<String> {
            Err(lector_engine::Error::recognition("stub recognizer failure"))
        }
    }

    /// Rasterizer that produces a fixed number of blank pages.
    pub struct FixedRasterizer {
        pages: usize,
    }

    impl FixedRasterizer {
        /// A rasterizer with no pages, for image-only tests.
        pub fn empty() -> Self {
            Self { pages: 0 }
        }

        /// A rasterizer producing `pages` blank pages.
        pub fn with_pages(pages: usize) -> Self {
            Self { pages }
        }
    }

    #[async_trait]
    impl PageRasterizer for FixedRasterizer {
        async fn rasterize(&self, _document: Bytes) -> lector_engine::Result<Vec<DynamicImage>> {
            Ok((0..self.pages)
                .map(|_| DynamicImage::ImageRgba8(RgbaImage::new(2, 2)))
                .collect())
        }
    }

    /// Translator that returns the same text for every request.
    pub struct FixedTranslator(pub &'static str);

    #[async_trait]
    impl TranslationProvider for FixedTranslator {
        async fn translate(
            &self,
            _text: &str,
            _target_lang: &str,
        ) -> lector_translate::Result<String> {
            Ok(self.0.to_owned())
        }
    }

    /// Translator whose upstream always reports a failure.
    pub struct FailingTranslator;

    #[async_trait]
    impl TranslationProvider for FailingTranslator {
        async fn translate(
            &self,
            _text: &str,
            _target_lang: &str,
        ) -> lector_translate::Result<String> {
            Err(lector_translate::Error::api_error(500, "upstream detail"))
        }
    }

    /// Returns application state assembled from stub collaborators.
    pub fn test_state(
        recognizer: impl TextRecognizer + 'static,
        rasterizer: impl PageRasterizer + 'static,
    ) -> ServiceState {
        test_state_with_translator(recognizer, rasterizer, FixedTranslator("bonjour"))
    }

    /// Returns application state with an explicit translator stub.
    pub fn test_state_with_translator(
        recognizer: impl TextRecognizer + 'static,
        rasterizer: impl PageRasterizer + 'static,
        translator: impl TranslationProvider + 'static,
    ) -> ServiceState {
        let engine = OcrEngine::new(Arc::new(recognizer), Arc::new(rasterizer));
        let task_registry = TaskRegistry::new(&RegistryConfig::default());

        ServiceState::new(
            engine,
            Arc::new(translator),
            task_registry,
            UploadConfig::default(),
        )
    }

    /// Returns application state with explicit upload limits.
    pub fn test_state_with_upload(
        recognizer: impl TextRecognizer + 'static,
        rasterizer: impl PageRasterizer + 'static,
        upload: UploadConfig,
    ) -> ServiceState {
        let engine = OcrEngine::new(Arc::new(recognizer), Arc::new(rasterizer));
        let task_registry = TaskRegistry::new(&RegistryConfig::default());

        ServiceState::new(
            engine,
            Arc::new(FixedTranslator("bonjour")),
            task_registry,
            upload,
        )
    }

    /// Returns a new [`TestServer`] with the given router and state.
    pub async fn create_test_server_with_state(
        router: ApiRouter<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let mut api = aide::openapi::OpenApi::default();
        let app = router.finish_api(&mut api).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a multipart form carrying one file field.
    pub fn multipart_file(
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> MultipartForm {
        let part = Part::bytes(data)
            .file_name(filename.to_owned())
            .mime_type(content_type.to_owned());

        MultipartForm::new().add_part("file", part)
    }

    /// Returns the bytes of a small valid PNG.
    pub fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([255, 255, 255, 255]),
        ));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    mod routing {
        use super::super::routes;
        use super::*;

        #[tokio::test]
        async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
            let state = test_state(FixedRecognizer("HELLO"), FixedRasterizer::empty());
            let server = create_test_server_with_state(routes(), state).await?;

            let response = server.get("/no-such-route").await;
            response.assert_status_not_found();

            Ok(())
        }

        #[tokio::test]
        async fn upload_then_poll_round_trip() -> anyhow::Result<()> {
            let state = test_state(FixedRecognizer("HELLO WORLD"), FixedRasterizer::empty());
            let server = create_test_server_with_state(routes(), state).await?;

            let form = multipart_file("scan.png", "image/png", png_bytes());
            let uploaded = server.post("/upload").multipart(form).await;
            uploaded.assert_status_ok();

            let task_id = uploaded.json::<serde_json::Value>()["task_id"]
                .as_str()
                .unwrap()
                .to_owned();

            let polled = server.get(&format!("/progress/{task_id}")).await;
            polled.assert_status_ok();

            let record = polled.json::<serde_json::Value>();
            assert_eq!(record["status"], "done");
            assert_eq!(record["progress"], 100);
            assert_eq!(record["text"], "HELLO WORLD");

            Ok(())
        }
    }
}
