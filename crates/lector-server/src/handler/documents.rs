//! Document upload handlers.
//!
//! Uploads run the full reading pipeline inline: the document is received,
//! recognized, and language-detected before the response is sent. The task
//! record transitions exactly once, and failures are reported through both
//! channels: the stored record and the HTTP error response.

use std::sync::Arc;

use aide::axum::ApiRouter;
use axum::extract::State;
use bytes::Bytes;
use lector_core::TaskRecord;
use lector_engine::OcrEngine;
use tokio::sync::Semaphore;

use crate::extract::{Json, Multipart};
use crate::handler::response::UploadedTask;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{ServiceState, TaskRegistry, UploadConfig};

/// Tracing target for document upload operations.
const TRACING_TARGET: &str = "lector_server::handler::documents";

/// Uploads a document and reads it into a task record.
///
/// Form data:
/// - the first field carrying a file name is treated as the document
#[tracing::instrument(skip_all)]
async fn upload_document(
    State(engine): State<OcrEngine>,
    State(task_registry): State<TaskRegistry>,
    State(upload_config): State<UploadConfig>,
    State(upload_permits): State<Arc<Semaphore>>,
    mut multipart: Multipart,
) -> Result<Json<UploadedTask>> {
    let _permit = upload_permits.acquire().await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "upload semaphore closed");
        ErrorKind::InternalServerError.into_error()
    })?;

    let mut document = None;

    while let Some(mut field) = multipart.next_field().await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to read multipart field");
        ErrorKind::BadRequest
            .with_message("Invalid multipart data")
            .with_context(format!("Failed to parse multipart form: {}", err))
    })? {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            tracing::debug!(target: TRACING_TARGET, "skipping field without filename");
            continue;
        };

        let content_type = field
            .content_type()
            .map(str::to_owned)
            .unwrap_or_else(|| "application/octet-stream".to_owned());

        tracing::debug!(
            target: TRACING_TARGET,
            filename = %filename,
            content_type = %content_type,
            "receiving document upload"
        );

        // Read file data with size limit to prevent memory exhaustion
        let mut data = Vec::new();

        while let Some(chunk) = field.chunk().await.map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, filename = %filename, "failed to read file chunk");
            ErrorKind::BadRequest
                .with_message("Failed to read file data")
                .with_context(format!("Could not read file '{}': {}", filename, err))
        })? {
            if data.len() + chunk.len() > upload_config.max_file_size {
                return Err(ErrorKind::PayloadTooLarge
                    .with_context(format!(
                        "uploads are limited to {} bytes",
                        upload_config.max_file_size
                    ))
                    .into_static());
            }
            data.extend_from_slice(&chunk);
        }

        // The first field with a file name is the document
        document = Some((filename, content_type, data));
        break;
    }

    let Some((filename, content_type, data)) = document else {
        return Err(ErrorKind::BadRequest.with_message("No file provided in multipart request"));
    };

    // The record exists before processing starts, so a poll during or
    // after a failed upload still finds it.
    let mut record = TaskRecord::new(filename);
    let task_id = record.id;
    task_registry.insert(record.clone()).await;

    match engine.read_document(&content_type, Bytes::from(data)).await {
        Ok((text, lang)) => {
            record.complete(text, lang);
            if !task_registry.update(&record).await {
                tracing::debug!(
                    target: TRACING_TARGET,
                    task_id = %task_id,
                    "task record evicted before completion"
                );
            }

            tracing::debug!(
                target: TRACING_TARGET,
                task_id = %task_id,
                lang = %record.lang,
                "document read successfully"
            );

            Ok(Json(UploadedTask { task_id }))
        }
        Err(error) => {
            record.fail(error.user_message());
            if !task_registry.update(&record).await {
                tracing::debug!(
                    target: TRACING_TARGET,
                    task_id = %task_id,
                    "task record evicted before failure was stored"
                );
            }

            tracing::warn!(
                target: TRACING_TARGET,
                task_id = %task_id,
                error = %error,
                "document processing failed"
            );

            Err(Error::from(error).with_resource(task_id.to_string()))
        }
    }
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::post;

    ApiRouter::new().api_route("/upload", post(upload_document))
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;
    use lector_core::TaskStatus;

    use super::*;
    use crate::handler::test::{
        FailingRecognizer, FixedRasterizer, FixedRecognizer, SequenceRecognizer,
        create_test_server_with_state, multipart_file, png_bytes, test_state,
        test_state_with_upload,
    };

    const RECOGNIZED: &str = "The quick brown fox jumps over the lazy dog near \
                              the quiet river bank every single morning.";

    #[tokio::test]
    async fn image_upload_creates_done_record() -> anyhow::Result<()> {
        let state = test_state(FixedRecognizer(RECOGNIZED), FixedRasterizer::empty());
        let server = create_test_server_with_state(routes(), state.clone()).await?;

        let form = multipart_file("scan.png", "image/png", png_bytes());
        let response = server.post("/upload").multipart(form).await;
        response.assert_status_ok();

        let uploaded = response.json::<UploadedTask>();
        let registry = TaskRegistry::from_ref(&state);
        let record = registry.get(uploaded.task_id).await.unwrap();

        assert_eq!(record.status, TaskStatus::Done);
        assert_eq!(record.progress, 100);
        assert_eq!(record.text, RECOGNIZED);
        assert_eq!(record.lang, "en");
        assert_eq!(record.filename, "scan.png");
        assert!(record.message.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn pdf_upload_joins_pages_in_order() -> anyhow::Result<()> {
        let state = test_state(SequenceRecognizer::default(), FixedRasterizer::with_pages(2));
        let server = create_test_server_with_state(routes(), state.clone()).await?;

        let form = multipart_file("report.pdf", "application/pdf", b"%PDF-1.4".to_vec());
        let response = server.post("/upload").multipart(form).await;
        response.assert_status_ok();

        let uploaded = response.json::<UploadedTask>();
        let registry = TaskRegistry::from_ref(&state);
        let record = registry.get(uploaded.task_id).await.unwrap();

        assert_eq!(record.status, TaskStatus::Done);
        assert_eq!(record.text, "page 1\npage 2");

        Ok(())
    }

    #[tokio::test]
    async fn unsupported_file_type_fails_both_channels() -> anyhow::Result<()> {
        let state = test_state(FixedRecognizer(RECOGNIZED), FixedRasterizer::empty());
        let server = create_test_server_with_state(routes(), state.clone()).await?;

        let form = multipart_file("notes.txt", "text/plain", b"just text".to_vec());
        let response = server.post("/upload").multipart(form).await;
        response.assert_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "unsupported_media_type");

        // The resource field links the error back to the stored record
        let task_id = body["resource"].as_str().unwrap().parse()?;
        let registry = TaskRegistry::from_ref(&state);
        let record = registry.get(task_id).await.unwrap();

        assert_eq!(record.status, TaskStatus::Error);
        assert_eq!(record.progress, 0);
        assert_eq!(record.text, "");
        assert!(record.message.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn recognition_failure_maps_to_bad_gateway() -> anyhow::Result<()> {
        let state = test_state(FailingRecognizer, FixedRasterizer::empty());
        let server = create_test_server_with_state(routes(), state.clone()).await?;

        let form = multipart_file("scan.png", "image/png", png_bytes());
        let response = server.post("/upload").multipart(form).await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "bad_gateway");

        let task_id = body["resource"].as_str().unwrap().parse()?;
        let registry = TaskRegistry::from_ref(&state);
        let record = registry.get(task_id).await.unwrap();

        assert_eq!(record.status, TaskStatus::Error);

        Ok(())
    }

    #[tokio::test]
    async fn upload_over_the_configured_size_limit_returns_413() -> anyhow::Result<()> {
        let upload = UploadConfig::default().with_max_file_size(16);
        let state = test_state_with_upload(
            FixedRecognizer(RECOGNIZED),
            FixedRasterizer::empty(),
            upload,
        );
        let server = create_test_server_with_state(routes(), state).await?;

        let form = multipart_file("scan.png", "image/png", png_bytes());
        let response = server.post("/upload").multipart(form).await;

        assert_eq!(
            response.status_code(),
            axum::http::StatusCode::PAYLOAD_TOO_LARGE
        );

        Ok(())
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() -> anyhow::Result<()> {
        let state = test_state(FixedRecognizer(RECOGNIZED), FixedRasterizer::empty());
        let server = create_test_server_with_state(routes(), state).await?;

        let form = axum_test::multipart::MultipartForm::new().add_text("note", "no file here");
        let response = server.post("/upload").multipart(form).await;
        response.assert_status_bad_request();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "bad_request");

        Ok(())
    }
}
