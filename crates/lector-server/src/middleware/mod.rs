//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides middleware for:
//! - Recovery (request timeouts, panic handling, tower service errors)
//! - Observability (request IDs, tracing spans, sensitive-header redaction)
//! - Security (CORS, security headers, compression, body limits)
//! - OpenAPI document generation with a Scalar UI

mod observability;
mod open_api;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use open_api::{OpenApiConfig, RouterOpenApiExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{
    CorsConfig, DEFAULT_MAX_BODY_SIZE, FrameOptions, ReferrerPolicy, RouterSecurityExt,
    SecurityHeadersConfig,
};
