//! The import workflow state machine.
//!
//! One instance drives one module's import from file selection to a
//! terminal outcome: `Configuring -> Submitting -> Resolved`. No state may
//! be skipped, and the only reverse transition is an explicit
//! [`ImportWorkflow::restart`] from `Resolved` back to `Configuring`.
//!
//! Transport failures never escape the submission boundary: they are
//! converted into a terminal outcome with `ERROR` status so the
//! presentation layer always has something to render. No automatic retries
//! are performed.

use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use rex_model::{
    ImportOptions, ImportOutcome, ImportPackage, ModuleType, OutcomeStatus, UploadCandidate,
    ValidationError,
};
use rex_transfer::{Transfer, TransferProgress};

use crate::file_guard::{FileGuard, FileGuardError};

/// Cap on errors shown to the user; the remainder is summarized as a
/// count. The full list stays in the outcome.
pub const MAX_DISPLAYED_ERRORS: usize = 10;

/// Where a workflow instance is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Accepting a file and options.
    Configuring,
    /// Submission in flight; exclusive, no new candidate may be presented.
    Submitting,
    /// Terminal for this run; outcome available, restart is the only exit.
    Resolved,
}

/// Errors from misusing the workflow. Transport failures are not errors
/// here; they resolve the workflow with an `ERROR` outcome instead.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    File(#[from] FileGuardError),

    #[error("no file selected")]
    NoCandidate,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("workflow already resolved; restart to run again")]
    AlreadyResolved,
}

/// How a terminal status should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// SUCCESS or VALID.
    Favorable,
    /// VALIDATION_ERRORS; the error list is populated.
    Partial,
    /// ERROR; the message carries the cause.
    Failed,
}

impl Disposition {
    #[must_use]
    pub fn of(status: OutcomeStatus) -> Self {
        match status {
            OutcomeStatus::Success | OutcomeStatus::Valid => Disposition::Favorable,
            OutcomeStatus::ValidationErrors => Disposition::Partial,
            OutcomeStatus::Error => Disposition::Failed,
        }
    }
}

/// Errors to display plus the count of those elided past the cap.
#[must_use]
pub fn displayed_errors(outcome: &ImportOutcome) -> (&[ValidationError], usize) {
    let shown = outcome.errors.len().min(MAX_DISPLAYED_ERRORS);
    (&outcome.errors[..shown], outcome.errors.len() - shown)
}

/// State machine for one import run.
///
/// Entry requires import permission for the module; that check is the
/// caller's responsibility (see [`crate::PermissionGate`]), not enforced
/// here.
pub struct ImportWorkflow {
    module: ModuleType,
    guard: FileGuard,
    state: WorkflowState,
    options: ImportOptions,
    candidate: Option<UploadCandidate>,
    outcome: Option<ImportOutcome>,
}

impl ImportWorkflow {
    /// Create a workflow with the default file guard (10 MB, standard
    /// extensions).
    #[must_use]
    pub fn new(module: ModuleType) -> Self {
        Self::with_guard(module, FileGuard::default())
    }

    /// Create a workflow with a custom file guard.
    #[must_use]
    pub fn with_guard(module: ModuleType, guard: FileGuard) -> Self {
        Self {
            module,
            guard,
            state: WorkflowState::Configuring,
            options: ImportOptions::default(),
            candidate: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn module(&self) -> ModuleType {
        self.module
    }

    #[must_use]
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    #[must_use]
    pub fn options(&self) -> ImportOptions {
        self.options
    }

    /// The currently selected file, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    /// The terminal outcome once the workflow has resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<&ImportOutcome> {
        self.outcome.as_ref()
    }

    /// Present a file for this run, replacing any previous selection.
    ///
    /// The file must pass the guard; rejections leave the workflow in
    /// `Configuring` with the previous candidate untouched.
    pub fn select_file(
        &mut self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<&UploadCandidate, WorkflowError> {
        self.ensure_configuring()?;
        let candidate = self.guard.accept(file_name, content)?;
        debug!(module = %self.module, file = %candidate.file_name, "file accepted");
        Ok(self.candidate.insert(candidate))
    }

    /// Discard the current selection.
    pub fn clear_file(&mut self) -> Result<(), WorkflowError> {
        self.ensure_configuring()?;
        self.candidate = None;
        Ok(())
    }

    /// Update import options. Only possible while configuring; options
    /// freeze once submission begins.
    pub fn set_options(&mut self, options: ImportOptions) -> Result<(), WorkflowError> {
        self.ensure_configuring()?;
        self.options = options;
        Ok(())
    }

    /// Submit the selected file and wait for the terminal outcome.
    ///
    /// Always resolves: transport or server failures become an outcome
    /// with `ERROR` status and the failure's display text as message.
    /// Progress reports forwarded to `on_progress` are clamped to be
    /// monotonically non-decreasing.
    pub async fn submit(
        &mut self,
        transfer: &dyn Transfer,
        on_progress: Option<&(dyn Fn(u8) + Send + Sync)>,
    ) -> Result<&ImportOutcome, WorkflowError> {
        self.ensure_configuring()?;
        let candidate = self.candidate.take().ok_or(WorkflowError::NoCandidate)?;

        self.state = WorkflowState::Submitting;
        info!(module = %self.module, file = %candidate.file_name, "import submitted");

        let highest = AtomicU8::new(0);
        let adapted = on_progress.map(|report| {
            move |progress: TransferProgress| {
                let pct = progress.percentage().min(100);
                let prev = highest.fetch_max(pct, Ordering::Relaxed);
                report(prev.max(pct));
            }
        });
        let progress = adapted
            .as_ref()
            .map(|cb| cb as &(dyn Fn(TransferProgress) + Send + Sync));

        let package = ImportPackage { candidate, options: self.options };
        let outcome = match transfer.import(self.module, package, progress).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(module = %self.module, error = %err, "import failed in transport");
                ImportOutcome::failure(err.to_string())
            }
        };

        info!(module = %self.module, status = ?outcome.status, "import resolved");
        self.state = WorkflowState::Resolved;
        Ok(self.outcome.insert(outcome))
    }

    /// Return to `Configuring`, discarding the candidate and outcome.
    pub fn restart(&mut self) {
        debug!(module = %self.module, "workflow restarted");
        self.state = WorkflowState::Configuring;
        self.candidate = None;
        self.outcome = None;
    }

    fn ensure_configuring(&self) -> Result<(), WorkflowError> {
        match self.state {
            WorkflowState::Configuring => Ok(()),
            WorkflowState::Submitting => Err(WorkflowError::SubmissionInFlight),
            WorkflowState::Resolved => Err(WorkflowError::AlreadyResolved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_with_errors(count: usize) -> ImportOutcome {
        ImportOutcome {
            status: OutcomeStatus::ValidationErrors,
            message: format!("{count} records failed validation"),
            total_records: count as u64,
            successful_records: 0,
            failed_records: count as u64,
            errors: (0..count)
                .map(|i| ValidationError {
                    row: i as u32 + 1,
                    field: "email".to_string(),
                    error_code: "INVALID_EMAIL".to_string(),
                    error_message: "Please enter a valid email address".to_string(),
                    actual_value: None,
                    expected_value: None,
                })
                .collect(),
            processed_at: None,
            processing_time_ms: 0,
        }
    }

    #[test]
    fn display_cap_keeps_full_list() {
        let outcome = outcome_with_errors(14);
        let (shown, elided) = displayed_errors(&outcome);
        assert_eq!(shown.len(), MAX_DISPLAYED_ERRORS);
        assert_eq!(elided, 4);
        assert_eq!(outcome.errors.len(), 14);
    }

    #[test]
    fn display_cap_with_short_list() {
        let outcome = outcome_with_errors(3);
        let (shown, elided) = displayed_errors(&outcome);
        assert_eq!(shown.len(), 3);
        assert_eq!(elided, 0);
    }

    #[test]
    fn disposition_mapping() {
        assert_eq!(Disposition::of(OutcomeStatus::Success), Disposition::Favorable);
        assert_eq!(Disposition::of(OutcomeStatus::Valid), Disposition::Favorable);
        assert_eq!(Disposition::of(OutcomeStatus::ValidationErrors), Disposition::Partial);
        assert_eq!(Disposition::of(OutcomeStatus::Error), Disposition::Failed);
    }

    #[test]
    fn selecting_a_second_file_replaces_the_first() {
        let mut workflow = ImportWorkflow::new(ModuleType::Robot);
        workflow.select_file("a.csv", vec![1]).unwrap();
        workflow.select_file("b.csv", vec![2, 3]).unwrap();
        let candidate = workflow.candidate().unwrap();
        assert_eq!(candidate.file_name, "b.csv");
        assert_eq!(candidate.byte_size(), 2);
    }

    #[test]
    fn rejected_file_leaves_previous_candidate() {
        let mut workflow = ImportWorkflow::new(ModuleType::Robot);
        workflow.select_file("a.csv", vec![1]).unwrap();
        assert!(workflow.select_file("bad.txt", vec![2]).is_err());
        assert_eq!(workflow.candidate().unwrap().file_name, "a.csv");
        assert_eq!(workflow.state(), WorkflowState::Configuring);
    }
}
