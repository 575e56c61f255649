//! Rasterization through the pdfium library.

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::raster::PageRasterizer;

const TRACING_TARGET: &str = "lector_engine::raster";

/// Points per inch in PDF coordinate space.
const POINTS_PER_INCH: f32 = 72.0;

/// Page rasterizer backed by pdfium.
///
/// pdfium is not async-safe, so each document is rendered on a blocking
/// worker thread with a library binding created for that call.
#[derive(Debug, Clone, Copy)]
pub struct PdfiumRasterizer {
    dpi: u32,
}

impl PdfiumRasterizer {
    /// Creates a rasterizer from the engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dpi: config.render_dpi,
        }
    }

    fn render_document(dpi: u32, document: &[u8]) -> Result<Vec<DynamicImage>> {
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|err| Error::operation("bind pdfium", err.to_string()))?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_byte_slice(document, None)
            .map_err(|err| Error::decode(format!("could not open PDF: {err}")))?;

        let scale = dpi as f32 / POINTS_PER_INCH;
        let mut pages = Vec::with_capacity(usize::from(document.pages().len()));

        for page in document.pages().iter() {
            let width = (page.width().value * scale).round().max(1.0) as i32;
            let height = (page.height().value * scale).round().max(1.0) as i32;
            let render_config = PdfRenderConfig::new()
                .set_target_width(width)
                .set_maximum_height(height);

            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|err| Error::decode(format!("could not render PDF page: {err}")))?;

            let image = RgbaImage::from_raw(
                bitmap.width() as u32,
                bitmap.height() as u32,
                bitmap.as_rgba_bytes(),
            )
            .ok_or_else(|| Error::operation("rasterize", "page buffer size mismatch"))?;

            pages.push(DynamicImage::ImageRgba8(image));
        }

        Ok(pages)
    }
}

#[async_trait]
impl PageRasterizer for PdfiumRasterizer {
    async fn rasterize(&self, document: Bytes) -> Result<Vec<DynamicImage>> {
        let dpi = self.dpi;
        let handle = tokio::task::spawn_blocking(move || Self::render_document(dpi, &document));

        match handle.await {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(error)) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "PDF rasterization failed");
                Err(error)
            }
            Err(error) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "rasterizer worker failed");
                Err(Error::operation(
                    "rasterize",
                    format!("worker thread failed: {error}"),
                ))
            }
        }
    }
}
