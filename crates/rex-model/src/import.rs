//! Import-side types: upload candidates, options, and the terminal outcome.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::OutcomeStatus;

/// Options chosen before an import is submitted.
///
/// Mutable only while the workflow is configuring; frozen once submission
/// begins. Both flags are passed through to the backend untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Run all checks without persisting records.
    pub validate_only: bool,
    /// Continue processing past row-level failures instead of aborting.
    pub skip_errors: bool,
}

/// A file accepted into an import workflow.
///
/// Owned exclusively by the workflow instance until submission, at which
/// point the content is handed to the transfer layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    /// Original file name, including extension.
    pub file_name: String,
    /// Lowercased extension with its leading dot (for example `.csv`).
    pub extension: String,
    /// Raw file content.
    pub content: Vec<u8>,
}

impl UploadCandidate {
    /// Size of the file content in bytes.
    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Everything the transfer layer needs to submit one import.
#[derive(Debug, Clone)]
pub struct ImportPackage {
    pub candidate: UploadCandidate,
    pub options: ImportOptions,
}

/// One per-row field failure reported by the backend.
///
/// Row numbering is 1-based over the source file's data rows, with the
/// header row excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub row: u32,
    pub field: String,
    pub error_code: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
}

/// Terminal artifact of one import workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub total_records: u64,
    pub successful_records: u64,
    pub failed_records: u64,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
    #[serde(default)]
    pub processed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl ImportOutcome {
    /// Synthesize the failure outcome used when the transport or server
    /// fails before a structured response is available. Guarantees the
    /// presentation layer always has a terminal value to render.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            message: message.into(),
            total_records: 0,
            successful_records: 0,
            failed_records: 0,
            errors: Vec::new(),
            processed_at: None,
            processing_time_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_parses_backend_json() {
        let json = r#"{
            "status": "VALIDATION_ERRORS",
            "message": "3 of 50 records failed validation",
            "totalRecords": 50,
            "successfulRecords": 47,
            "failedRecords": 3,
            "errors": [
                {
                    "row": 4,
                    "field": "email",
                    "errorCode": "INVALID_EMAIL",
                    "errorMessage": "Please enter a valid email address",
                    "actualValue": "not-an-email"
                }
            ],
            "processingTimeMs": 412
        }"#;
        let outcome: ImportOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::ValidationErrors);
        assert_eq!(outcome.total_records, 50);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 4);
        assert_eq!(outcome.errors[0].expected_value, None);
        assert!(outcome.successful_records + outcome.failed_records <= outcome.total_records);
    }

    #[test]
    fn failure_outcome_is_empty_and_terminal() {
        let outcome = ImportOutcome::failure("network error: timed out");
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.total_records, 0);
        assert_eq!(outcome.successful_records, 0);
        assert_eq!(outcome.failed_records, 0);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn candidate_reports_byte_size() {
        let candidate = UploadCandidate {
            file_name: "robot.csv".to_string(),
            extension: ".csv".to_string(),
            content: vec![0u8; 1024],
        };
        assert_eq!(candidate.byte_size(), 1024);
    }
}
