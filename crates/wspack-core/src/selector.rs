//! Search prefix selection.
//!
//! Decides which archive entries receive stamped metadata. The prefix is the
//! source directory's basename followed by a suffix, and the test is a plain
//! string-prefix comparison against the entry's archive path.

/// How the search prefix is assembled from basename and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMatch {
    /// `<basename><suffix>` with no separator.
    ///
    /// Archive paths always continue with `/` after the basename, so this
    /// only matches when the suffix is empty or begins with `/`.
    #[default]
    Literal,

    /// `<basename>/<suffix>`, selecting entries under the `<suffix>`
    /// subdirectory (and siblings whose names start with `<suffix>`).
    Segment,
}

/// Precomputed search prefix for one packaging run.
///
/// # Examples
///
/// ```
/// use wspack_core::PrefixMatch;
/// use wspack_core::SearchPrefix;
///
/// let literal = SearchPrefix::new("gwen-workspace", "gwen", PrefixMatch::Literal);
/// assert_eq!(literal.as_str(), "gwen-workspacegwen");
/// assert!(!literal.matches("gwen-workspace/gwen/build.json"));
///
/// let segment = SearchPrefix::new("gwen-workspace", "gwen", PrefixMatch::Segment);
/// assert!(segment.matches("gwen-workspace/gwen/build.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPrefix {
    prefix: String,
    segment: String,
    mode: PrefixMatch,
}

impl SearchPrefix {
    /// Builds the prefix from the source basename and suffix.
    #[must_use]
    pub fn new(basename: &str, suffix: &str, mode: PrefixMatch) -> Self {
        let segment = format!("{basename}/{suffix}");
        let prefix = match mode {
            PrefixMatch::Literal => format!("{basename}{suffix}"),
            PrefixMatch::Segment => segment.clone(),
        };
        Self {
            prefix,
            segment,
            mode,
        }
    }

    /// Returns the prefix string compared against archive paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Returns the mode the prefix was built with.
    #[must_use]
    pub const fn mode(&self) -> PrefixMatch {
        self.mode
    }

    /// Returns `true` if the first `len(prefix)` characters of `archive_path`
    /// equal the prefix.
    ///
    /// Paths shorter than the prefix never match.
    #[must_use]
    pub fn matches(&self, archive_path: &str) -> bool {
        archive_path.starts_with(&self.prefix)
    }

    /// Returns `true` if `archive_path` would match the separator-joined
    /// form of the prefix.
    ///
    /// Used to detect runs where literal mode selected nothing although the
    /// `<basename>/<suffix>` tree is populated.
    #[must_use]
    pub fn matches_segment(&self, archive_path: &str) -> bool {
        archive_path.starts_with(&self.segment)
    }

    /// Returns the separator-joined form of the prefix.
    #[must_use]
    pub fn segment_form(&self) -> &str {
        &self.segment
    }
}

impl std::fmt::Display for SearchPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}
