//! Shared data model for the record exchange toolkit.
//!
//! Defines the module/record taxonomy, the wire-facing request and response
//! types exchanged with the backend import/export API, and the client-side
//! upload types. All wire types serialize as camelCase JSON to match the
//! backend contract.

pub mod enums;
pub mod error;
pub mod export;
pub mod import;

pub use enums::{Action, FileFormat, ModuleType, OutcomeStatus, SortOrder};
pub use error::{ModelError, Result};
pub use export::{ExportOutcome, ExportRequest};
pub use import::{
    ImportOptions, ImportOutcome, ImportPackage, UploadCandidate, ValidationError,
};
