//! Error types for workspace packaging.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packaging a directory.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ZIP writer rejected an operation.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failed.
    #[error("cannot walk {path}: {reason}")]
    Walk {
        /// Path being visited when traversal failed.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// Source directory does not exist.
    #[error("{} does not exist.", path.display())]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Source exists but is not a directory.
    #[error("{} is not a directory.", path.display())]
    SourceNotDirectory {
        /// The offending source path.
        path: PathBuf,
    },

    /// Source path has no usable final component (e.g. `/` or `..`).
    #[error("cannot determine directory name of {}", path.display())]
    InvalidSource {
        /// The offending source path.
        path: PathBuf,
    },

    /// Output archive exists and overwriting is disabled.
    #[error("{} already exists", path.display())]
    OutputExists {
        /// The existing output path.
        path: PathBuf,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}, expected 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Path cannot be represented as a ZIP entry name.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },
}

impl PackError {
    /// Returns `true` if the error was raised before any archive was written.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use wspack_core::PackError;
    ///
    /// let err = PackError::SourceNotFound {
    ///     path: PathBuf::from("./gwen-workspace"),
    /// };
    /// assert!(err.is_precondition());
    ///
    /// let err = PackError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_precondition());
    /// ```
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::SourceNotDirectory { .. }
                | Self::InvalidSource { .. }
                | Self::OutputExists { .. }
                | Self::InvalidCompressionLevel { .. }
        )
    }

    /// Returns the filesystem path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Walk { path, .. }
            | Self::SourceNotFound { path }
            | Self::SourceNotDirectory { path }
            | Self::InvalidSource { path }
            | Self::OutputExists { path }
            | Self::NonUtf8Path { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_message() {
        let err = PackError::SourceNotFound {
            path: PathBuf::from("./gwen-workspace"),
        };
        assert_eq!(err.to_string(), "./gwen-workspace does not exist.");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PackError = io_err.into();
        assert!(matches!(err, PackError::Io(_)));
        assert!(!err.is_precondition());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_is_precondition() {
        let err = PackError::OutputExists {
            path: PathBuf::from("out.zip"),
        };
        assert!(err.is_precondition());

        let err = PackError::InvalidCompressionLevel { level: 12 };
        assert!(err.is_precondition());
        assert!(err.to_string().contains("12"));

        let err = PackError::Walk {
            path: PathBuf::from("dir"),
            reason: "permission denied".into(),
        };
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_path_accessor() {
        let err = PackError::SourceNotDirectory {
            path: PathBuf::from("file.txt"),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("file.txt")));
    }
}
