//! Packaging reports and progress callbacks.

use std::path::Path;
use std::time::Duration;

/// Report of a packaging run.
///
/// # Examples
///
/// ```
/// use wspack_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.bytes_read = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of files added to the archive.
    pub files_added: usize,

    /// Number of those files written with stamped metadata.
    pub files_stamped: usize,

    /// Number of symlinks left out (unfollowed directory links, dangling
    /// links and loops).
    pub files_skipped: usize,

    /// Total bytes read from source files (uncompressed).
    pub bytes_read: u64,

    /// Size of the finished archive on disk.
    pub bytes_compressed: u64,

    /// Search prefix used for stamping.
    pub search_prefix: String,

    /// Duration of the run.
    pub duration: Duration,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage.
    ///
    /// Archive overhead can exceed the input for tiny files, in which case
    /// the result is negative.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_compressed as f64 / self.bytes_read as f64) * 100.0
    }
}

/// Receives progress updates while an archive is written.
pub trait ProgressCallback {
    /// Called before an entry is written.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of file data written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry is fully written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once the archive is finalized.
    fn on_complete(&mut self);
}

/// Progress callback that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings() {
        let mut report = PackReport::new();
        assert!(!report.has_warnings());
        report.add_warning("skipped symlink");
        assert!(report.has_warnings());
        assert_eq!(report.warnings, vec!["skipped symlink".to_string()]);
    }

    #[test]
    fn test_compression_ratio_edge_cases() {
        let mut report = PackReport::new();
        assert!(report.compression_ratio().abs() < f64::EPSILON);

        report.bytes_read = 1000;
        assert!(report.compression_ratio().abs() < f64::EPSILON);

        report.bytes_compressed = 1000;
        assert!((report.compression_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compression_percentage() {
        let mut report = PackReport::new();
        assert!(report.compression_percentage().abs() < f64::EPSILON);

        report.bytes_read = 1000;
        report.bytes_compressed = 500;
        assert!((report.compression_percentage() - 50.0).abs() < f64::EPSILON);

        report.bytes_compressed = 2000;
        assert!(report.compression_percentage() < 0.0);
    }

    #[test]
    fn test_noop_progress() {
        let mut progress = NoopProgress;
        progress.on_entry_start(Path::new("a"), 1, 1);
        progress.on_bytes_written(10);
        progress.on_entry_complete(Path::new("a"));
        progress.on_complete();
    }
}
