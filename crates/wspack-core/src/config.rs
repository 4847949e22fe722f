//! Configuration for packaging operations.

use crate::PackError;
use crate::Result;
use crate::selector::PrefixMatch;
use std::path::PathBuf;

/// Default directory packaged when none is given.
pub const DEFAULT_SOURCE_DIR: &str = "./gwen-workspace";

/// Default archive written when none is given.
pub const DEFAULT_OUTPUT: &str = "target/workspace/gwen-workspace.zip";

/// Default suffix appended to the source basename to form the search prefix.
pub const DEFAULT_SUFFIX: &str = "gwen";

/// Configuration for packaging a directory into a ZIP archive.
///
/// # Examples
///
/// ```
/// use wspack_core::PackConfig;
/// use wspack_core::PrefixMatch;
///
/// let config = PackConfig::new("./gwen-workspace", "out/gwen-workspace.zip")
///     .with_match_mode(PrefixMatch::Segment)
///     .with_compression_level(9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Directory whose contents are packaged.
    pub source_dir: PathBuf,

    /// Archive file to create.
    pub output: PathBuf,

    /// Appended to the source basename to form the search prefix.
    ///
    /// Default: `"gwen"`.
    pub suffix: String,

    /// How the search prefix is assembled from basename and suffix.
    ///
    /// Default: [`PrefixMatch::Literal`].
    pub match_mode: PrefixMatch,

    /// Deflate level (1-9). `None` uses the library default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Descend into symlinked directories.
    ///
    /// Symlinked files are archived with their target's content either way.
    ///
    /// Default: `false` (directory links are skipped with a warning).
    pub follow_symlinks: bool,

    /// Replace an existing output archive.
    ///
    /// Default: `true`.
    pub overwrite: bool,

    /// Create missing parent directories of the output archive.
    ///
    /// Default: `true`.
    pub create_parent_dirs: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            suffix: DEFAULT_SUFFIX.to_string(),
            match_mode: PrefixMatch::Literal,
            compression_level: Some(6),
            follow_symlinks: false,
            overwrite: true,
            create_parent_dirs: true,
        }
    }
}

impl PackConfig {
    /// Creates a configuration for the given source directory and output
    /// archive, with defaults for everything else.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Sets the search prefix suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the prefix match mode.
    #[must_use]
    pub fn with_match_mode(mut self, mode: PrefixMatch) -> Self {
        self.match_mode = mode;
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are reported by [`PackConfig::validate`].
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Uses the ZIP library's default compression level.
    #[must_use]
    pub fn with_default_compression(mut self) -> Self {
        self.compression_level = None;
        self
    }

    /// Sets whether to descend into symlinked directories.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether an existing archive may be replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether missing output directories are created.
    #[must_use]
    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(PackError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
