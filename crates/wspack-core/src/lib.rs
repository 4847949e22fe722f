//! Packages a workspace directory into a ZIP archive.
//!
//! `wspack-core` walks a source directory and writes every regular file into
//! a deflate-compressed ZIP archive under `<basename>/<relative path>`.
//! Entries whose archive path starts with a search prefix (the source
//! basename followed by a suffix) are stamped with the current time and mode
//! `0o100755`; all other entries keep their on-disk timestamp and
//! permissions.
//!
//! # Examples
//!
//! ```no_run
//! use wspack_core::PackConfig;
//! use wspack_core::PrefixMatch;
//! use wspack_core::pack_directory;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackConfig::new("./gwen-workspace", "target/workspace/gwen-workspace.zip")
//!     .with_match_mode(PrefixMatch::Segment);
//! let report = pack_directory(&config)?;
//! println!("Created {} ({} files)", config.output.display(), report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod config;
pub mod error;
pub mod report;
pub mod selector;
pub mod stamp;
pub mod walker;

pub use archiver::pack_directory;
pub use archiver::pack_directory_with_progress;
pub use config::PackConfig;
pub use error::PackError;
pub use error::Result;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;
pub use selector::PrefixMatch;
pub use selector::SearchPrefix;
pub use stamp::EntryStamp;
pub use stamp::REGULAR_FILE_MODE_0755;
