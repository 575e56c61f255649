//! PDF page rasterization.

use async_trait::async_trait;
use bytes::Bytes;
use image::DynamicImage;

use crate::error::Result;

mod pdfium;

pub use pdfium::PdfiumRasterizer;

/// Renders every page of a PDF document to an image.
///
/// Page order in the returned vector matches document order. A document
/// with no pages yields an empty vector, not an error.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Rasterizes all pages of the given PDF bytes.
    async fn rasterize(&self, document: Bytes) -> Result<Vec<DynamicImage>>;
}
