//! Import/export workflow core.
//!
//! Sequences the client side of a record import: file acceptance through
//! [`FileGuard`], option configuration, submission through a
//! [`rex_transfer::Transfer`] implementation, and interpretation of the
//! terminal outcome. Exports have no multi-step workflow; the
//! [`ExportRequestBuilder`] assembles a single request from user
//! selections. [`PermissionGate`] gates both entry points per module and
//! action, failing closed.
//!
//! The crate is presentation-agnostic: a UI observes the workflow through
//! its state accessor and the advisory progress callback rather than
//! through any event-loop coupling.

pub mod export;
pub mod file_guard;
pub mod import;
pub mod permissions;

pub use export::{ExportBuildError, ExportRequestBuilder};
pub use file_guard::{
    DEFAULT_ACCEPTED_EXTENSIONS, DEFAULT_MAX_BYTES, FileGuard, FileGuardError,
};
pub use import::{
    Disposition, ImportWorkflow, MAX_DISPLAYED_ERRORS, WorkflowError, WorkflowState,
    displayed_errors,
};
pub use permissions::PermissionGate;
