//! HTTP transfer adapter for the record exchange backend.
//!
//! Performs the three remote operations the workflow depends on: multipart
//! import submission, JSON-body export, and template download. The
//! operations live behind the [`Transfer`] trait so the workflow crate can
//! be driven by an in-memory fake in tests; [`TransferClient`] is the
//! reqwest implementation.

pub mod client;
pub mod error;
pub mod progress;

pub use client::{
    DownloadedFile, ProgressFn, Transfer, TransferClient, export_file_name, template_file_name,
};
pub use error::{Operation, Result, TransferError};
pub use progress::{ProgressTracker, TransferProgress, format_bytes};
