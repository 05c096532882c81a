//! Pre-submission file checks.
//!
//! A candidate file either fully satisfies both checks or is rejected with
//! exactly one reason; size is checked before format. Rejections happen
//! synchronously before any workflow state transition, so a rejected file
//! never reaches the transport.

use thiserror::Error;

use rex_model::UploadCandidate;

/// Default maximum upload size (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default accepted file extensions, each with its leading dot.
pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &[".csv", ".xlsx", ".xls", ".json"];

/// Why a candidate file was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileGuardError {
    /// File exceeds the configured size limit (reported in rounded MB).
    #[error("File size exceeds {limit_mb}MB limit")]
    OversizedFile { limit_mb: u64 },

    /// File extension is not in the accepted set.
    #[error("Unsupported file format. Allowed: {accepted}")]
    UnsupportedFormat { accepted: String },
}

/// Validates candidate files against accepted extensions and a size cap.
#[derive(Debug, Clone)]
pub struct FileGuard {
    accepted: Vec<String>,
    max_bytes: u64,
}

impl Default for FileGuard {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTED_EXTENSIONS.iter().copied(), DEFAULT_MAX_BYTES)
    }
}

impl FileGuard {
    /// Create a guard for the given extension set (entries include their
    /// leading dot) and maximum byte size.
    pub fn new<I, S>(accepted: I, max_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = accepted
            .into_iter()
            .map(|ext| ext.as_ref().to_ascii_lowercase())
            .collect();
        Self { accepted, max_bytes }
    }

    /// Configured size limit in bytes.
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Check a file and, when it passes, wrap it as an upload candidate.
    pub fn accept(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadCandidate, FileGuardError> {
        if content.len() as u64 > self.max_bytes {
            return Err(FileGuardError::OversizedFile { limit_mb: self.limit_mb() });
        }

        let extension = extension_of(file_name);
        if !self.accepted.contains(&extension) {
            return Err(FileGuardError::UnsupportedFormat { accepted: self.accepted.join(", ") });
        }

        Ok(UploadCandidate { file_name: file_name.to_string(), extension, content })
    }

    fn limit_mb(&self) -> u64 {
        (self.max_bytes as f64 / 1024.0 / 1024.0).round() as u64
    }
}

/// Lowercased extension with its leading dot; empty when the name has none.
fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{}", ext.to_ascii_lowercase()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_file_within_limit() {
        let guard = FileGuard::default();
        let candidate = guard.accept("robot.csv", vec![0u8; 200 * 1024]).unwrap();
        assert_eq!(candidate.file_name, "robot.csv");
        assert_eq!(candidate.extension, ".csv");
        assert_eq!(candidate.byte_size(), 200 * 1024);
    }

    #[test]
    fn rejects_oversized_file_with_limit_in_mb() {
        let guard = FileGuard::default();
        let err = guard.accept("camera.xlsx", vec![0u8; 12 * 1024 * 1024]).unwrap_err();
        assert_eq!(err, FileGuardError::OversizedFile { limit_mb: 10 });
        assert_eq!(err.to_string(), "File size exceeds 10MB limit");
    }

    #[test]
    fn rejects_unsupported_extension_listing_accepted_set() {
        let guard = FileGuard::default();
        let err = guard.accept("data.txt", vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file format. Allowed: .csv, .xlsx, .xls, .json"
        );
    }

    #[test]
    fn size_is_checked_before_format() {
        let guard = FileGuard::default();
        let err = guard.accept("data.txt", vec![0u8; 11 * 1024 * 1024]).unwrap_err();
        assert!(matches!(err, FileGuardError::OversizedFile { .. }));
    }

    #[test]
    fn extension_comparison_is_case_insensitive() {
        let guard = FileGuard::default();
        assert!(guard.accept("Report.XLSX", vec![0u8; 10]).is_ok());
    }

    #[test]
    fn file_without_extension_is_unsupported() {
        let guard = FileGuard::default();
        assert!(matches!(
            guard.accept("README", vec![0u8; 10]),
            Err(FileGuardError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn custom_limit_rounds_to_nearest_mb() {
        let guard = FileGuard::new([".csv"], 5 * 1024 * 1024 + 600 * 1024);
        let err = guard.accept("big.csv", vec![0u8; 6 * 1024 * 1024]).unwrap_err();
        assert_eq!(err, FileGuardError::OversizedFile { limit_mb: 6 });
    }
}
