//! Source directory traversal.
//!
//! Enumerates every regular file under the source directory and computes its
//! archive path relative to the source's parent, so entry names begin with
//! the source basename. No process working directory is changed.
//!
//! Symlinks to files are archived under the link's own path with the
//! target's content and metadata. Symlinked directories are only descended
//! when following is enabled.

use crate::PackError;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A regular file scheduled for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Filesystem path to the file.
    pub path: PathBuf,

    /// Entry name inside the archive, `/`-separated, starting with the
    /// source basename.
    pub archive_path: String,

    /// Size in bytes at traversal time.
    pub size: u64,
}

/// Outcome of visiting one filesystem node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
    /// A regular file to archive.
    File(FileEntry),

    /// A symlink left out: a directory link that is not followed, a dangling
    /// link, or a link that loops back to an ancestor.
    SkippedSymlink(PathBuf),
}

/// Walks a source directory in file-name order.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use wspack_core::walker::SourceWalker;
/// use wspack_core::walker::WalkItem;
///
/// let walker = SourceWalker::new(Path::new("./gwen-workspace"), false)?;
/// for item in walker.walk() {
///     if let WalkItem::File(entry) = item? {
///         println!("{}", entry.archive_path);
///     }
/// }
/// # Ok::<(), wspack_core::PackError>(())
/// ```
pub struct SourceWalker<'a> {
    root: &'a Path,
    base: PathBuf,
    follow_symlinks: bool,
    exclude: Option<PathBuf>,
}

impl<'a> SourceWalker<'a> {
    /// Creates a walker rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidSource`] if `root` has no final component
    /// to use as the archive's top-level name.
    pub fn new(root: &'a Path, follow_symlinks: bool) -> Result<Self> {
        let base = archive_base(root)?;
        Ok(Self {
            root,
            base,
            follow_symlinks,
            exclude: None,
        })
    }

    /// Skips `path` if encountered (used for an output archive that lives
    /// inside the source tree).
    #[must_use]
    pub fn excluding(mut self, path: Option<PathBuf>) -> Self {
        self.exclude = path.and_then(|p| p.canonicalize().ok());
        self
    }

    /// Returns the source directory's basename.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NonUtf8Path`] if the basename is not UTF-8.
    pub fn basename(&self) -> Result<&str> {
        self.base.to_str().ok_or_else(|| PackError::NonUtf8Path {
            path: self.base.clone(),
        })
    }

    /// Returns an iterator over the files (and skipped symlinks) below the
    /// root.
    ///
    /// Directories are descended but not yielded.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkItem>> + '_ {
        WalkDir::new(self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => self.visit(&entry).transpose(),
                Err(e) => Some(self.recover(&e)),
            })
    }

    /// Turns link-related traversal failures into skipped entries.
    fn recover(&self, err: &walkdir::Error) -> Result<WalkItem> {
        if let Some(path) = err.path()
            && (err.loop_ancestor().is_some() || is_dangling_symlink(path))
        {
            return Ok(WalkItem::SkippedSymlink(path.to_path_buf()));
        }
        Err(walk_error(err, self.root))
    }

    fn visit(&self, entry: &walkdir::DirEntry) -> Result<Option<WalkItem>> {
        let file_type = entry.file_type();
        let path = entry.path();

        if file_type.is_dir() {
            return Ok(None);
        }

        // Only unfollowed links reach here as symlinks; resolve file targets.
        let metadata = if file_type.is_symlink() {
            match fs::metadata(path) {
                Ok(target) if target.is_file() => target,
                _ => return Ok(Some(WalkItem::SkippedSymlink(path.to_path_buf()))),
            }
        } else if file_type.is_file() {
            entry.metadata().map_err(|e| walk_error(&e, path))?
        } else {
            tracing::debug!(path = %path.display(), "skipping special file");
            return Ok(None);
        };

        if let Some(exclude) = &self.exclude
            && is_same_file(path, exclude)
        {
            tracing::debug!(path = %path.display(), "skipping output archive inside source");
            return Ok(None);
        }

        let archive_path = self.archive_path(path)?;

        Ok(Some(WalkItem::File(FileEntry {
            path: path.to_path_buf(),
            archive_path,
            size: metadata.len(),
        })))
    }

    /// Computes `<basename>/<relative path>` with `/` separators.
    fn archive_path(&self, path: &Path) -> Result<String> {
        let relative = path.strip_prefix(self.root).map_err(|_| PackError::Walk {
            path: path.to_path_buf(),
            reason: format!("not below {}", self.root.display()),
        })?;
        normalize_zip_path(&self.base.join(relative))
    }
}

/// Returns the source's final component, the archive's top-level name.
///
/// Paths like `.` are resolved first so they still yield a name.
fn archive_base(root: &Path) -> Result<PathBuf> {
    let name = match root.file_name() {
        Some(name) => Some(PathBuf::from(name)),
        None => root
            .canonicalize()
            .ok()
            .and_then(|resolved| resolved.file_name().map(PathBuf::from)),
    };
    name.ok_or_else(|| PackError::InvalidSource {
        path: root.to_path_buf(),
    })
}

/// `canonical` must already be canonicalized.
fn is_same_file(path: &Path, canonical: &Path) -> bool {
    path.file_name() == canonical.file_name()
        && path.canonicalize().is_ok_and(|resolved| resolved == canonical)
}

fn is_dangling_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
        && fs::metadata(path).is_err()
}

fn walk_error(err: &walkdir::Error, fallback: &Path) -> PackError {
    PackError::Walk {
        path: err.path().unwrap_or(fallback).to_path_buf(),
        reason: err.to_string(),
    }
}

/// Normalizes a path into a ZIP entry name.
///
/// ZIP requires `/` separators regardless of platform.
pub(crate) fn normalize_zip_path(path: &Path) -> Result<String> {
    let path_str = path.to_str().ok_or_else(|| PackError::NonUtf8Path {
        path: path.to_path_buf(),
    })?;

    #[cfg(windows)]
    let normalized = path_str.replace('\\', "/");

    #[cfg(not(windows))]
    let normalized = path_str.to_string();

    Ok(normalized)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn files(walker: &SourceWalker<'_>) -> Vec<FileEntry> {
        walker
            .walk()
            .filter_map(|item| match item.unwrap() {
                WalkItem::File(entry) => Some(entry),
                WalkItem::SkippedSymlink(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_archive_paths_start_with_basename() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("gwen-workspace");
        fs::create_dir_all(root.join("gwen")).unwrap();
        fs::write(root.join("data.txt"), "data").unwrap();
        fs::write(root.join("gwen/build.json"), "{}").unwrap();

        let walker = SourceWalker::new(&root, false).unwrap();
        let names: Vec<String> = files(&walker).into_iter().map(|e| e.archive_path).collect();

        assert_eq!(
            names,
            vec![
                "gwen-workspace/data.txt".to_string(),
                "gwen-workspace/gwen/build.json".to_string(),
            ]
        );
    }

    #[test]
    fn test_every_file_visited_once() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        for name in ["one", "a/two", "a/b/three", "a/b/c/four", ".hidden"] {
            fs::write(root.join(name), name).unwrap();
        }

        let walker = SourceWalker::new(&root, false).unwrap();
        let mut names: Vec<String> = files(&walker).into_iter().map(|e| e.archive_path).collect();
        names.sort();
        let before = names.len();
        names.dedup();

        assert_eq!(before, names.len());
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"ws/.hidden".to_string()));
        assert!(names.contains(&"ws/a/b/c/four".to_string()));
    }

    #[test]
    fn test_entry_size() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("f.bin"), vec![0u8; 1234]).unwrap();

        let walker = SourceWalker::new(&root, false).unwrap();
        let entries = files(&walker);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 1234);
        assert_eq!(entries[0].path, root.join("f.bin"));
    }

    #[test]
    fn test_excluded_path_is_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.txt"), "k").unwrap();
        fs::write(root.join("out.zip"), "z").unwrap();

        let walker = SourceWalker::new(&root, false)
            .unwrap()
            .excluding(Some(root.join("out.zip")));
        let names: Vec<String> = files(&walker).into_iter().map(|e| e.archive_path).collect();
        assert_eq!(names, vec!["ws/keep.txt".to_string()]);
    }

    #[test]
    fn test_root_without_basename_is_rejected() {
        let result = SourceWalker::new(Path::new("/"), false);
        assert!(matches!(result, Err(PackError::InvalidSource { .. })));
    }

    #[test]
    fn test_current_dir_resolves_to_name() {
        let walker = SourceWalker::new(Path::new("."), false).unwrap();
        let expected = std::env::current_dir().unwrap();
        assert_eq!(
            walker.basename().unwrap(),
            expected.file_name().unwrap().to_str().unwrap()
        );
    }

    #[test]
    fn test_basename() {
        let walker = SourceWalker::new(Path::new("some/dir/gwen-workspace"), false).unwrap();
        assert_eq!(walker.basename().unwrap(), "gwen-workspace");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_symlink_yields_target() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir(&root).unwrap();
        fs::write(temp.path().join("outside.txt"), "outside").unwrap();
        std::os::unix::fs::symlink("../outside.txt", root.join("link.txt")).unwrap();

        let walker = SourceWalker::new(&root, false).unwrap();
        let items: Vec<WalkItem> = walker.walk().map(Result::unwrap).collect();

        assert_eq!(
            items,
            vec![WalkItem::File(FileEntry {
                path: root.join("link.txt"),
                archive_path: "ws/link.txt".to_string(),
                size: 7,
            })]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_not_descended_by_default() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        let shared = temp.path().join("shared");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&shared).unwrap();
        fs::write(shared.join("inner.txt"), "i").unwrap();
        std::os::unix::fs::symlink(&shared, root.join("shared")).unwrap();

        let walker = SourceWalker::new(&root, false).unwrap();
        let items: Vec<WalkItem> = walker.walk().map(Result::unwrap).collect();

        assert_eq!(items, vec![WalkItem::SkippedSymlink(root.join("shared"))]);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_descended_when_followed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        let shared = temp.path().join("shared");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&shared).unwrap();
        fs::write(shared.join("inner.txt"), "i").unwrap();
        std::os::unix::fs::symlink(&shared, root.join("shared")).unwrap();

        let walker = SourceWalker::new(&root, true).unwrap();
        let names: Vec<String> = files(&walker).into_iter().map(|e| e.archive_path).collect();
        assert_eq!(names, vec!["ws/shared/inner.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_symlink_same_in_both_modes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("target.txt"), "t").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.txt")).unwrap();

        for follow in [false, true] {
            let walker = SourceWalker::new(&root, follow).unwrap();
            let names: Vec<String> = files(&walker).into_iter().map(|e| e.archive_path).collect();
            assert_eq!(names, vec!["ws/link.txt".to_string(), "ws/target.txt".to_string()]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(root.join("missing.txt"), root.join("broken")).unwrap();

        for follow in [false, true] {
            let walker = SourceWalker::new(&root, follow).unwrap();
            let items: Vec<WalkItem> = walker.walk().map(Result::unwrap).collect();
            assert_eq!(items, vec![WalkItem::SkippedSymlink(root.join("broken"))]);
        }
    }

    #[test]
    fn test_normalize_zip_path() {
        assert_eq!(
            normalize_zip_path(Path::new("dir/file.txt")).unwrap(),
            "dir/file.txt"
        );
        assert_eq!(normalize_zip_path(Path::new("file.txt")).unwrap(), "file.txt");
    }
}
