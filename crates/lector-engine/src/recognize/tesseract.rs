//! Recognition through an external tesseract process.

use std::io::Cursor;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::recognize::TextRecognizer;

const TRACING_TARGET: &str = "lector_engine::recognize";

/// Text recognizer backed by the tesseract command-line engine.
///
/// Each call spawns one engine process, feeds it a PNG rendition of the
/// input over stdin, and reads the recognized text back from stdout. The
/// engine consumes all of stdin before emitting output, so the sequential
/// write-then-wait below cannot deadlock.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    engine_path: String,
    languages: String,
    timeout: Duration,
}

impl TesseractRecognizer {
    /// Creates a recognizer from the engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            engine_path: config.engine_path.clone(),
            languages: config.languages.clone(),
            timeout: config.timeout(),
        }
    }

    fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| Error::operation("encode page", err.to_string()))?;

        Ok(buffer)
    }

    async fn run_engine(&self, png: Vec<u8>) -> Result<String> {
        let mut child = Command::new(&self.engine_path)
            .args(["stdin", "stdout", "-l", &self.languages])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET,
                    engine_path = %self.engine_path,
                    error = %err,
                    "failed to start recognition engine"
                );
                Error::recognition(format!(
                    "failed to start engine at '{}': {err}",
                    self.engine_path
                ))
            })?;

        let Some(mut stdin) = child.stdin.take() else {
            return Err(Error::operation("recognize", "engine stdin was not captured"));
        };

        stdin.write_all(&png).await.map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to feed engine input");
            Error::recognition(format!("failed to feed engine input: {err}"))
        })?;
        drop(stdin);

        // A timed-out future drops the child, and kill_on_drop reaps it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout_seconds = self.timeout.as_secs(),
                    "recognition engine timed out"
                );
                Error::timeout(self.timeout)
            })?
            .map_err(|err| {
                Error::recognition(format!("engine did not run to completion: {err}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("engine exited with {}", output.status),
                trimmed => trimmed.to_owned(),
            };
            tracing::error!(
                target: TRACING_TARGET,
                status = ?output.status.code(),
                error = %reason,
                "recognition engine failed"
            );
            return Err(Error::recognition(reason));
        }

        String::from_utf8(output.stdout)
            .map_err(|err| Error::recognition(format!("engine produced invalid UTF-8: {err}")))
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let png = Self::encode_png(image)?;
        self.run_engine(png).await
    }
}
