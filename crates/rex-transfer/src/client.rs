//! Backend client for import, export, and template download.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use rex_model::{
    ExportOutcome, ExportRequest, FileFormat, ImportOutcome, ImportPackage, ModuleType,
    OutcomeStatus,
};

use crate::error::{Operation, Result, TransferError};
use crate::progress::TransferProgress;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Callback invoked with advisory progress during a submission.
pub type ProgressFn<'a> = dyn Fn(TransferProgress) + Send + Sync + 'a;

/// File name for a delivered export: `{module}_export.{format}`.
#[must_use]
pub fn export_file_name(module: ModuleType, format: FileFormat) -> String {
    format!("{}_export.{}", module, format.extension())
}

/// File name for a downloaded template: `{module}_template.{format}`.
#[must_use]
pub fn template_file_name(module: ModuleType, format: FileFormat) -> String {
    format!("{}_template.{}", module, format.extension())
}

/// A binary payload received from the backend, with its client-side name.
///
/// Writing the payload to disk is the caller's concern; this layer only
/// names it.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
    /// Record count from the `X-Record-Count` header, when the server
    /// provides one. Only set for exports.
    pub record_count: Option<u64>,
}

impl DownloadedFile {
    /// Builds the client-side summary for a completed export.
    #[must_use]
    pub fn export_outcome(&self) -> ExportOutcome {
        ExportOutcome {
            status: OutcomeStatus::Success,
            message: "Export completed".to_string(),
            file_name: self.file_name.clone(),
            file_size_bytes: self.data.len() as u64,
            record_count: self.record_count.unwrap_or(0),
            exported_at: Utc::now(),
        }
    }
}

/// Remote operations the workflow depends on.
///
/// Export and template download are independent one-shot calls with no
/// shared mutable state, so concurrent invocations do not interfere.
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Submits one import. Progress reports are advisory only.
    async fn import(
        &self,
        module: ModuleType,
        package: ImportPackage,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<ImportOutcome>;

    /// Requests an export and returns the delivered file.
    async fn export(&self, request: &ExportRequest) -> Result<DownloadedFile>;

    /// Downloads the sample template for a module.
    async fn download_template(
        &self,
        module: ModuleType,
        format: FileFormat,
    ) -> Result<DownloadedFile>;
}

/// reqwest-backed [`Transfer`] implementation.
pub struct TransferClient {
    http: Client,
    base_url: String,
}

impl TransferClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransferError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn url(&self, module: ModuleType, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, module, path)
    }

    /// Import with `validateOnly` forced on: runs all server-side checks
    /// without persisting records.
    pub async fn validate_file(
        &self,
        module: ModuleType,
        mut package: ImportPackage,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<ImportOutcome> {
        package.options.validate_only = true;
        self.submit_import(Operation::Validate, module, package, progress)
            .await
    }

    async fn submit_import(
        &self,
        operation: Operation,
        module: ModuleType,
        package: ImportPackage,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<ImportOutcome> {
        let total = package.candidate.byte_size();
        info!(
            module = %module,
            file = %package.candidate.file_name,
            bytes = total,
            validate_only = package.options.validate_only,
            skip_errors = package.options.skip_errors,
            "submitting import"
        );

        if let Some(report) = progress {
            report(TransferProgress::new(0, total));
        }

        let part = Part::bytes(package.candidate.content).file_name(package.candidate.file_name);
        let form = Form::new()
            .part("file", part)
            .text("validateOnly", package.options.validate_only.to_string())
            .text("skipErrors", package.options.skip_errors.to_string());

        let response = self
            .http
            .post(self.url(module, "import"))
            .multipart(form)
            .send()
            .await?;

        // reqwest exposes no upload hook for multipart bodies, so the body
        // is fully sent once a response exists.
        if let Some(report) = progress {
            report(TransferProgress::new(total, total));
        }

        let response = check_status(operation, response).await?;
        let outcome: ImportOutcome = response
            .json()
            .await
            .map_err(|e| TransferError::InvalidResponse(e.to_string()))?;
        debug!(status = ?outcome.status, total = outcome.total_records, "import resolved");
        Ok(outcome)
    }
}

#[async_trait]
impl Transfer for TransferClient {
    async fn import(
        &self,
        module: ModuleType,
        package: ImportPackage,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<ImportOutcome> {
        self.submit_import(Operation::Import, module, package, progress)
            .await
    }

    async fn export(&self, request: &ExportRequest) -> Result<DownloadedFile> {
        info!(
            module = %request.module_type,
            format = %request.file_format,
            fields = request.fields.len(),
            "requesting export"
        );
        let response = self
            .http
            .post(self.url(request.module_type, "export"))
            .json(request)
            .send()
            .await?;
        let response = check_status(Operation::Export, response).await?;

        let record_count = record_count_header(&response);
        let file_name = export_file_name(request.module_type, request.file_format);
        let data = response.bytes().await?.to_vec();
        debug!(file = %file_name, bytes = data.len(), "export delivered");
        Ok(DownloadedFile { file_name, data, record_count })
    }

    async fn download_template(
        &self,
        module: ModuleType,
        format: FileFormat,
    ) -> Result<DownloadedFile> {
        info!(module = %module, format = %format, "downloading template");
        let response = self
            .http
            .get(self.url(module, "template"))
            .query(&[("format", format.extension())])
            .send()
            .await?;
        let response = check_status(Operation::Template, response).await?;

        let file_name = template_file_name(module, format);
        let data = response.bytes().await?.to_vec();
        Ok(DownloadedFile { file_name, data, record_count: None })
    }
}

/// Error payload shape the backend uses for all failed calls.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

/// Picks the message for an error response: the payload's `message` field
/// when present, otherwise the operation's generic fallback.
fn error_message(operation: Operation, status: StatusCode, body: &[u8]) -> String {
    let from_payload = serde_json::from_slice::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.is_empty());
    match from_payload {
        Some(message) => message,
        None => {
            warn!(status = status.as_u16(), "error response without message field");
            operation.fallback_message().to_string()
        }
    }
}

fn record_count_header(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("x-record-count")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

async fn check_status(operation: Operation, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(TransferError::Server {
        status: status.as_u16(),
        message: error_message(operation, status, &body),
    })
}
