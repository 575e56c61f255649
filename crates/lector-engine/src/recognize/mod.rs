//! Text recognition over rendered images.

use async_trait::async_trait;
use image::DynamicImage;

use crate::error::Result;

mod tesseract;

pub use tesseract::TesseractRecognizer;

/// Converts one rendered image into plain text.
///
/// Implementations run exactly one recognition pass per call and never
/// return partial results: a failed pass surfaces as an error with nothing
/// recognized.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognizes the text contained in a single image.
    async fn recognize(&self, image: &DynamicImage) -> Result<String>;
}
