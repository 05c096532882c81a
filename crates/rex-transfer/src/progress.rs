//! Advisory upload progress reporting.
//!
//! Progress has no bearing on the correctness of the final outcome; it
//! exists so a presentation layer can show movement during a submission.
//! Reports are monotonically non-decreasing within one submission, which
//! [`ProgressTracker`] enforces for transports that cannot guarantee it.

/// Progress of one submission.
#[derive(Debug, Clone, Copy)]
pub struct TransferProgress {
    /// Bytes handed to the transport so far.
    pub sent: u64,
    /// Total bytes to send.
    pub total: u64,
    /// Progress as a fraction (0.0 to 1.0).
    pub fraction: f32,
}

impl TransferProgress {
    /// Creates a new progress instance. A zero-byte submission has
    /// nothing left to send, so `total == 0` counts as complete.
    #[must_use]
    pub fn new(sent: u64, total: u64) -> Self {
        let fraction = if total > 0 {
            ((sent as f64 / total as f64).min(1.0)) as f32
        } else {
            1.0
        };
        Self { sent, total, fraction }
    }

    /// Progress as a percentage (0-100).
    #[must_use]
    pub fn percentage(&self) -> u8 {
        (self.fraction * 100.0).min(100.0) as u8
    }
}

/// Clamps a stream of percentage reports to be non-decreasing.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    highest: u8,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in a new report and returns the value to display.
    pub fn observe(&mut self, percentage: u8) -> u8 {
        self.highest = self.highest.max(percentage.min(100));
        self.highest
    }

    /// Highest percentage observed so far.
    #[must_use]
    pub fn current(&self) -> u8 {
        self.highest
    }
}

/// Formats a byte count in human-readable form.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_bounded() {
        assert_eq!(TransferProgress::new(0, 100).percentage(), 0);
        assert_eq!(TransferProgress::new(50, 100).percentage(), 50);
        assert_eq!(TransferProgress::new(150, 100).percentage(), 100);
    }

    #[test]
    fn empty_upload_reports_complete() {
        // A zero-byte file reports 100 at send and at completion, so the
        // stream still ends at 100.
        assert_eq!(TransferProgress::new(0, 0).percentage(), 100);
        assert_eq!(TransferProgress::new(10, 0).percentage(), 100);
    }

    #[test]
    fn tracker_never_goes_backwards() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.observe(10), 10);
        assert_eq!(tracker.observe(60), 60);
        assert_eq!(tracker.observe(30), 60);
        assert_eq!(tracker.observe(200), 100);
        assert_eq!(tracker.current(), 100);
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.00 MB");
    }
}
