//! Error types for the transfer layer.

use thiserror::Error;

/// Remote operation being performed, used to pick the generic fallback
/// message when an error payload carries no `message` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Import,
    Export,
    Template,
    Validate,
}

impl Operation {
    /// Fixed message used when the server reports an error without one.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Import => "Import failed",
            Operation::Export => "Export failed",
            Operation::Template => "Template download failed",
            Operation::Validate => "Validation failed",
        }
    }
}

/// Errors raised by the transfer layer.
///
/// The `Display` text of every variant is suitable for direct presentation;
/// the import workflow folds it verbatim into its fallback outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransferError {
    /// The server responded with an error status. The message comes from
    /// the error payload's `message` field, or the operation's generic
    /// fallback when the payload has none.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable cause.
        message: String,
    },

    /// The request never produced a response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server responded with success but the body did not parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;
