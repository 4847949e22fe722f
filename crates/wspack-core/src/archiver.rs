//! ZIP archive writing.
//!
//! Packages a source directory into a deflate-compressed ZIP archive. Entries
//! whose archive path starts with the search prefix are read into memory and
//! written with stamped metadata; all others are streamed from disk with
//! their own timestamp and permissions.

use crate::PackError;
use crate::Result;
use crate::config::PackConfig;
use crate::report::NoopProgress;
use crate::report::PackReport;
use crate::report::ProgressCallback;
use crate::selector::PrefixMatch;
use crate::selector::SearchPrefix;
use crate::stamp::EntryStamp;
use crate::stamp::external_attributes;
use crate::walker::FileEntry;
use crate::walker::SourceWalker;
use crate::walker::WalkItem;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Packages `config.source_dir` into `config.output`.
///
/// # Examples
///
/// ```no_run
/// use wspack_core::PackConfig;
/// use wspack_core::pack_directory;
///
/// let config = PackConfig::new("./gwen-workspace", "target/workspace/gwen-workspace.zip");
/// let report = pack_directory(&config)?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), wspack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The source directory does not exist or is not a directory (no archive
///   is created in that case)
/// - The output exists and overwriting is disabled
/// - Any file cannot be read or the archive cannot be written
pub fn pack_directory(config: &PackConfig) -> Result<PackReport> {
    pack_directory_with_progress(config, &mut NoopProgress)
}

/// Packages a directory, reporting progress through `progress`.
///
/// # Errors
///
/// Same as [`pack_directory`].
pub fn pack_directory_with_progress(
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();
    config.validate()?;
    check_source(&config.source_dir)?;

    let walker = SourceWalker::new(&config.source_dir, config.follow_symlinks)?;
    let prefix = SearchPrefix::new(walker.basename()?, &config.suffix, config.match_mode);

    let file = create_output(config)?;
    let walker = walker.excluding(Some(config.output.clone()));

    tracing::info!(
        source = %config.source_dir.display(),
        output = %config.output.display(),
        prefix = %prefix,
        "packaging directory"
    );

    let mut report = PackReport {
        search_prefix: prefix.to_string(),
        ..PackReport::default()
    };

    let entries = collect_files(&walker, &mut report)?;
    let file = write_archive(file, &entries, &prefix, config, &mut report, progress)?;
    file.sync_all()?;

    report.bytes_compressed = file.metadata()?.len();
    report.duration = start.elapsed();
    progress.on_complete();

    tracing::info!(
        files = report.files_added,
        stamped = report.files_stamped,
        bytes = report.bytes_read,
        "archive finished"
    );

    Ok(report)
}

/// Verifies the source exists and is a directory.
fn check_source(source: &Path) -> Result<()> {
    if !source.exists() {
        return Err(PackError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(PackError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }
    Ok(())
}

fn create_output(config: &PackConfig) -> Result<File> {
    let output = &config.output;
    if !config.overwrite && output.exists() {
        return Err(PackError::OutputExists {
            path: output.clone(),
        });
    }

    if config.create_parent_dirs
        && let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    Ok(File::create(output)?)
}

/// Single-pass collection so progress knows the total up front.
fn collect_files(walker: &SourceWalker<'_>, report: &mut PackReport) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for item in walker.walk() {
        match item? {
            WalkItem::File(entry) => entries.push(entry),
            WalkItem::SkippedSymlink(path) => {
                tracing::debug!(path = %path.display(), "skipping symlink");
                report.files_skipped += 1;
                report.add_warning(format!("Skipped symlink: {}", path.display()));
            }
        }
    }
    Ok(entries)
}

fn base_options(config: &PackConfig) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    match config.compression_level {
        Some(level) => options.compression_level(Some(i64::from(level))),
        None => options,
    }
}

/// Writes every entry and finalizes the archive, returning the inner writer.
///
/// On error the `ZipWriter` is dropped, which closes the underlying file.
fn write_archive<W: Write + Seek>(
    writer: W,
    entries: &[FileEntry],
    prefix: &SearchPrefix,
    config: &PackConfig,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = base_options(config);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut segment_hits = 0usize;
    let total = entries.len();

    for (idx, entry) in entries.iter().enumerate() {
        let name = Path::new(&entry.archive_path);
        progress.on_entry_start(name, total, idx + 1);

        if prefix.matches(&entry.archive_path) {
            add_stamped_file(&mut zip, entry, options, report, progress)?;
        } else {
            if prefix.mode() == PrefixMatch::Literal && prefix.matches_segment(&entry.archive_path)
            {
                segment_hits += 1;
            }
            add_disk_file(&mut zip, entry, options, report, progress, &mut buffer)?;
        }

        progress.on_entry_complete(name);
    }

    if report.files_stamped == 0 && segment_hits > 0 {
        let msg = format!(
            "search prefix '{}' matched no files, but {segment_hits} file(s) start with '{}'",
            prefix,
            prefix.segment_form()
        );
        tracing::info!("{msg}");
        report.add_warning(msg);
    }

    Ok(zip.finish()?)
}

/// Reads the whole file and writes it with the current time and
/// `REGULAR_FILE_MODE_0755`.
fn add_stamped_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &FileEntry,
    options: SimpleFileOptions,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;
    let mut contents = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut contents)?;
    drop(file);

    let stamp = EntryStamp::stamped_now();
    if let EntryStamp::Stamped { mode, .. } = stamp {
        tracing::debug!(
            entry = %entry.archive_path,
            external_attr = %format!("{:#010x}", external_attributes(mode)),
            "stamping entry"
        );
    }

    zip.start_file(entry.archive_path.as_str(), stamp.apply(options, &metadata))?;
    zip.write_all(&contents)?;

    let written = contents.len() as u64;
    progress.on_bytes_written(written);
    report.files_added += 1;
    report.files_stamped += 1;
    report.bytes_read += written;

    Ok(())
}

/// Streams the file from disk keeping its own metadata.
fn add_disk_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &FileEntry,
    options: SimpleFileOptions,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<()> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    tracing::debug!(entry = %entry.archive_path, "adding entry");
    zip.start_file(
        entry.archive_path.as_str(),
        EntryStamp::Preserved.apply(options, &metadata),
    )?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    report.files_added += 1;
    report.bytes_read += bytes_written;

    Ok(())
}
