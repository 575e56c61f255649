//! Extraction orchestration over the recognition and rasterization seams.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::media::MediaKind;
use crate::raster::{PageRasterizer, PdfiumRasterizer};
use crate::recognize::{TesseractRecognizer, TextRecognizer};
use crate::{EngineConfig, detect_language};

const TRACING_TARGET: &str = "lector_engine::service";

/// Separator inserted between recognized PDF pages.
const PAGE_SEPARATOR: &str = "\n";

/// Text extraction engine.
///
/// Dispatches on the declared content type: images get a single recognition
/// pass, PDFs are rasterized and recognized page by page. The engine holds
/// its collaborators behind [`Arc`], so it is cheap to clone into handlers.
#[derive(Clone)]
pub struct OcrEngine {
    recognizer: Arc<dyn TextRecognizer>,
    rasterizer: Arc<dyn PageRasterizer>,
}

impl OcrEngine {
    /// Creates an engine with the given collaborators.
    pub fn new(recognizer: Arc<dyn TextRecognizer>, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self {
            recognizer,
            rasterizer,
        }
    }

    /// Creates an engine with the standard tesseract and pdfium backends.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::new(
            Arc::new(TesseractRecognizer::new(config)),
            Arc::new(PdfiumRasterizer::new(config)),
        )
    }

    /// Extracts text from uploaded bytes according to the declared content type.
    ///
    /// Images are recognized in one pass. PDFs are rasterized and each page
    /// recognized independently; page texts are joined with a single line
    /// separator in page order. Failures never carry partial results.
    pub async fn extract_text(&self, content_type: &str, data: Bytes) -> Result<String> {
        match MediaKind::from_content_type(content_type) {
            Some(MediaKind::Image) => self.extract_from_image(&data).await,
            Some(MediaKind::Pdf) => self.extract_from_pdf(data).await,
            None => {
                tracing::error!(
                    target: TRACING_TARGET,
                    content_type,
                    "rejected unsupported content type"
                );
                Err(Error::unsupported_file_type(content_type))
            }
        }
    }

    /// Extracts text and identifies its language in one step.
    ///
    /// Returns the recognized text together with the detected language code;
    /// empty text reports the fixed default language.
    pub async fn read_document(&self, content_type: &str, data: Bytes) -> Result<(String, String)> {
        let text = self.extract_text(content_type, data).await?;
        let lang = detect_language(&text);

        tracing::debug!(
            target: TRACING_TARGET,
            content_type,
            text_length = text.len(),
            lang = %lang,
            "document read"
        );

        Ok((text, lang))
    }

    async fn extract_from_image(&self, data: &[u8]) -> Result<String> {
        let image = image::load_from_memory(data).map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to decode image");
            Error::decode(format!("could not decode image: {err}"))
        })?;

        self.recognizer.recognize(&image).await
    }

    async fn extract_from_pdf(&self, data: Bytes) -> Result<String> {
        let pages = self.rasterizer.rasterize(data).await?;

        let mut texts = Vec::with_capacity(pages.len());
        for page in &pages {
            texts.push(self.recognizer.recognize(page).await?);
        }

        Ok(texts.join(PAGE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;

    /// Recognizer that labels pages in call order.
    #[derive(Default)]
    struct SequenceRecognizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextRecognizer for SequenceRecognizer {
        async fn recognize(&self, _image: &DynamicImage) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("page {call}"))
        }
    }

    struct FailingRecognizer;

    #[async_trait]
    impl TextRecognizer for FailingRecognizer {
        async fn recognize(&self, _image: &DynamicImage) -> Result<String> {
            Err(Error::recognition("stub recognizer failure"))
        }
    }

    /// Rasterizer that produces a fixed number of blank pages.
    struct FixedRasterizer {
        pages: usize,
    }

    #[async_trait]
    impl PageRasterizer for FixedRasterizer {
        async fn rasterize(&self, _document: Bytes) -> Result<Vec<DynamicImage>> {
            Ok((0..self.pages)
                .map(|_| DynamicImage::ImageRgba8(RgbaImage::new(2, 2)))
                .collect())
        }
    }

    struct FailingRasterizer;

    #[async_trait]
    impl PageRasterizer for FailingRasterizer {
        async fn rasterize(&self, _document: Bytes) -> Result<Vec<DynamicImage>> {
            Err(Error::decode("stub rasterizer failure"))
        }
    }

    fn png_bytes() -> Bytes {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([255, 255, 255, 255]),
        ));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    fn engine_with(
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
    ) -> OcrEngine {
        OcrEngine::new(recognizer, rasterizer)
    }

    #[tokio::test]
    async fn image_upload_is_recognized_once() {
        let recognizer = Arc::new(SequenceRecognizer::default());
        let engine = engine_with(recognizer.clone(), Arc::new(FixedRasterizer { pages: 0 }));

        let text = engine.extract_text("image/png", png_bytes()).await.unwrap();

        assert_eq!(text, "page 1");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pdf_pages_join_in_order_with_single_separator() {
        let recognizer = Arc::new(SequenceRecognizer::default());
        let engine = engine_with(recognizer.clone(), Arc::new(FixedRasterizer { pages: 3 }));

        let text = engine
            .extract_text("application/pdf", Bytes::from_static(b"%PDF-"))
            .await
            .unwrap();

        assert_eq!(text, "page 1\npage 2\npage 3");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_pdf_yields_empty_text() {
        let recognizer = Arc::new(SequenceRecognizer::default());
        let engine = engine_with(recognizer.clone(), Arc::new(FixedRasterizer { pages: 0 }));

        let text = engine
            .extract_text("application/pdf", Bytes::from_static(b"%PDF-"))
            .await
            .unwrap();

        assert_eq!(text, "");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_content_type_is_rejected() {
        let engine = engine_with(
            Arc::new(SequenceRecognizer::default()),
            Arc::new(FixedRasterizer { pages: 0 }),
        );

        let error = engine
            .extract_text("text/plain", Bytes::from_static(b"hello"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::UnsupportedFileType { .. }));
    }

    #[tokio::test]
    async fn undecodable_image_bytes_fail_with_decode_error() {
        let engine = engine_with(
            Arc::new(SequenceRecognizer::default()),
            Arc::new(FixedRasterizer { pages: 0 }),
        );

        let error = engine
            .extract_text("image/png", Bytes::from_static(b"not an image"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn recognition_failure_propagates_without_partial_text() {
        let engine = engine_with(Arc::new(FailingRecognizer), Arc::new(FixedRasterizer { pages: 2 }));

        let error = engine
            .extract_text("application/pdf", Bytes::from_static(b"%PDF-"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Recognition { .. }));
    }

    #[tokio::test]
    async fn rasterization_failure_propagates() {
        let engine = engine_with(Arc::new(SequenceRecognizer::default()), Arc::new(FailingRasterizer));

        let error = engine
            .extract_text("application/pdf", Bytes::from_static(b"junk"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn read_document_reports_default_language_for_empty_text() {
        let engine = engine_with(
            Arc::new(SequenceRecognizer::default()),
            Arc::new(FixedRasterizer { pages: 0 }),
        );

        let (text, lang) = engine
            .read_document("application/pdf", Bytes::from_static(b"%PDF-"))
            .await
            .unwrap();

        assert_eq!(text, "");
        assert_eq!(lang, lector_core::DEFAULT_LANGUAGE);
    }
}
