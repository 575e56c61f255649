#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod detect;
pub mod error;
mod media;
pub mod raster;
pub mod recognize;
mod service;

pub use crate::config::EngineConfig;
pub use crate::detect::detect_language;
pub use crate::error::{Error, Result};
pub use crate::media::MediaKind;
pub use crate::raster::{PageRasterizer, PdfiumRasterizer};
pub use crate::recognize::{TesseractRecognizer, TextRecognizer};
pub use crate::service::OcrEngine;
