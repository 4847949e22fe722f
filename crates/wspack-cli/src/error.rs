//! Error conversion utilities for CLI.
//!
//! Converts wspack-core's typed errors (thiserror) into user-facing
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use wspack_core::PackError;

/// Converts `PackError` to an anyhow error with context.
///
/// A missing source keeps the bare `<path> does not exist.` message so the
/// process reports `Error: <path> does not exist.`.
pub fn convert_pack_error(err: PackError, output: &Path) -> anyhow::Error {
    match err {
        err @ PackError::SourceNotFound { .. } => anyhow!(err),
        PackError::SourceNotDirectory { path } => {
            anyhow!(
                "{} is not a directory.\n\
                 HINT: Pass the directory to package as SOURCE.",
                path.display()
            )
        }
        PackError::OutputExists { path } => {
            anyhow!(
                "{} already exists\n\
                 HINT: Remove --no-clobber to replace it.",
                path.display()
            )
        }
        PackError::InvalidSource { path } => {
            anyhow!(
                "Cannot derive an archive name from '{}'\n\
                 HINT: Pass a named directory, not a filesystem root.",
                path.display()
            )
        }
        PackError::Io(io_err) => {
            anyhow!("I/O error while writing '{}': {}", output.display(), io_err)
        }
        _ => anyhow::Error::from(err).context(format!("Failed to create '{}'", output.display())),
    }
}

/// Adds context to the result of a packaging run.
pub fn add_pack_context<T>(result: Result<T, PackError>, output: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, output))
}
