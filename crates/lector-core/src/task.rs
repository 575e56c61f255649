//! Task records for document reading jobs.
//!
//! A [`TaskRecord`] is created when an upload is accepted and transitions
//! exactly once, within the same request, to a terminal state. The registry
//! in the server crate stores these records for later progress queries.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};
use uuid::Uuid;

use crate::lang::DEFAULT_LANGUAGE;

/// Lifecycle state of a reading task.
///
/// A task starts in [`TaskStatus::Processing`] and moves exactly once to
/// either [`TaskStatus::Done`] or [`TaskStatus::Error`]. Terminal states are
/// never left.
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    /// Work is still running inside the originating request.
    #[default]
    Processing,
    /// Recognition and detection finished successfully.
    Done,
    /// Processing failed; the record carries a failure message.
    Error,
}

impl TaskStatus {
    /// Returns `true` once the task has reached `done` or `error`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// State of a single document reading job.
///
/// The record is immutable from the client's point of view once terminal:
/// repeated progress queries for the same id observe identical contents.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TaskRecord {
    /// Unique identifier minted when the upload was accepted. Never reused.
    pub id: Uuid,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Completion percentage. Only 0 and 100 are ever produced.
    pub progress: u8,
    /// File name exactly as supplied by the client. Untrusted; never used
    /// to touch the filesystem.
    pub filename: String,
    /// Extracted text. Empty until the task completes.
    pub text: String,
    /// Detected language code. Starts at the fixed default.
    pub lang: String,
    /// Failure description. Present only when `status` is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TaskRecord {
    /// Creates a fresh record in the `processing` state with a newly minted id.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: TaskStatus::Processing,
            progress: 0,
            filename: filename.into(),
            text: String::new(),
            lang: DEFAULT_LANGUAGE.to_owned(),
            message: None,
        }
    }

    /// Transitions the record to `done` with the recognized text and language.
    pub fn complete(&mut self, text: impl Into<String>, lang: impl Into<String>) {
        self.status = TaskStatus::Done;
        self.progress = 100;
        self.text = text.into();
        self.lang = lang.into();
        self.message = None;
    }

    /// Transitions the record to `error`, keeping whatever text and language
    /// were last seen before the failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = TaskStatus::Error;
        self.message = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_processing() {
        let record = TaskRecord::new("scan.png");

        assert!(!record.id.is_nil());
        assert_eq!(record.status, TaskStatus::Processing);
        assert_eq!(record.progress, 0);
        assert_eq!(record.filename, "scan.png");
        assert!(record.text.is_empty());
        assert_eq!(record.lang, DEFAULT_LANGUAGE);
        assert!(record.message.is_none());
    }

    #[test]
    fn record_ids_are_unique() {
        let first = TaskRecord::new("a.png");
        let second = TaskRecord::new("a.png");

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn complete_reaches_terminal_state() {
        let mut record = TaskRecord::new("scan.png");
        record.complete("HELLO", "en");

        assert_eq!(record.status, TaskStatus::Done);
        assert_eq!(record.progress, 100);
        assert_eq!(record.text, "HELLO");
        assert_eq!(record.lang, "en");
        assert!(record.message.is_none());
        assert!(record.status.is_terminal());
    }

    #[test]
    fn fail_keeps_pre_error_fields() {
        let mut record = TaskRecord::new("scan.pdf");
        record.fail("recognition failed");

        assert_eq!(record.status, TaskStatus::Error);
        assert_eq!(record.progress, 0);
        assert!(record.text.is_empty());
        assert_eq!(record.lang, DEFAULT_LANGUAGE);
        assert_eq!(record.message.as_deref(), Some("recognition failed"));
        assert!(record.status.is_terminal());
    }

    #[test]
    fn statuses_serialize_lowercase() {
        let processing = serde_json::to_value(TaskStatus::Processing).unwrap();
        let done = serde_json::to_value(TaskStatus::Done).unwrap();
        let error = serde_json::to_value(TaskStatus::Error).unwrap();

        assert_eq!(processing, "processing");
        assert_eq!(done, "done");
        assert_eq!(error, "error");
    }

    #[test]
    fn message_is_omitted_until_failure() {
        let mut record = TaskRecord::new("scan.png");

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("message").is_none());
        assert_eq!(value["status"], "processing");
        assert_eq!(value["progress"], 0);

        record.fail("boom");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["message"], "boom");
    }
}
