//! OCR engine error to HTTP error conversion implementation.
//!
//! This module provides conversion from document processing errors to appropriate
//! HTTP errors with proper status codes and user-friendly messages.

use super::http_error::{Error as HttpError, ErrorKind};

impl<'a> From<lector_engine::Error> for HttpError<'a> {
    fn from(engine_error: lector_engine::Error) -> Self {
        match engine_error {
            // Client sent a file the reader does not handle -> Unsupported Media Type
            lector_engine::Error::UnsupportedFileType { ref content_type } => {
                ErrorKind::UnsupportedMediaType
                    .with_message("Upload an image or a PDF document")
                    .with_context(format!("declared content type '{}'", content_type))
            }

            // File bytes did not match the declared type -> Unprocessable Entity
            lector_engine::Error::Decode { .. } => ErrorKind::UnprocessableEntity
                .with_message("The file could not be decoded as its declared type"),

            // The recognition engine itself failed -> Bad Gateway
            lector_engine::Error::Recognition { .. } => {
                ErrorKind::BadGateway.with_message("Text recognition failed")
            }

            lector_engine::Error::Timeout { timeout } => ErrorKind::RequestTimeout
                .with_message("Text recognition timed out")
                .with_context(format!("recognition deadline of {:?} exceeded", timeout)),

            // Configuration and subprocess plumbing errors -> Internal Server Error
            lector_engine::Error::InvalidConfig { .. } | lector_engine::Error::Operation { .. } => {
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn unsupported_file_type_maps_to_415() {
        let engine_error = lector_engine::Error::unsupported_file_type("text/plain");
        let error = HttpError::from(engine_error);

        assert_eq!(error.kind(), ErrorKind::UnsupportedMediaType);
        assert_eq!(error.kind().status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(error.context().is_some_and(|c| c.contains("text/plain")));
    }

    #[test]
    fn decode_failure_maps_to_422() {
        let engine_error = lector_engine::Error::decode("not a PNG stream");
        let error = HttpError::from(engine_error);

        assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(
            error.kind().status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn recognition_failure_maps_to_502() {
        let engine_error = lector_engine::Error::recognition("engine exited with status 1");
        let error = HttpError::from(engine_error);

        assert_eq!(error.kind(), ErrorKind::BadGateway);
        assert_eq!(error.kind().status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_errors_hide_details() {
        let engine_error = lector_engine::Error::operation("spawn", "no such file or directory");
        let error = HttpError::from(engine_error);

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.context().is_none());
        assert!(error.message().is_none());
    }
}
