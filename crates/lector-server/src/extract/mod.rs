//! Enhanced HTTP request extractors with improved error handling and validation.
//!
//! This module provides custom Axum extractors that enhance the default
//! functionality with better error messages and type safety. All extractors
//! are designed to be drop-in replacements for their standard Axum
//! counterparts.
//!
//! # Extractors
//!
//! - [`Json`] - Enhanced JSON deserialization with better error messages
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] - Path parameter extraction with detailed error context
//! - [`Multipart`] - Multipart form extraction with improved error handling

pub mod reject;

pub use crate::extract::reject::{Json, Multipart, Path, ValidateJson};
