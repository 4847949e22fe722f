//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use wspack_core::PackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    /// The success line is unstyled in every mode.
    fn created_line(output_path: &Path) -> String {
        format!("Created {}", output_path.display())
    }

    fn write_summary(&self, report: &PackReport) {
        let _ = self.term.write_line("");
        let _ = self
            .term
            .write_line(&format!("  Files added:      {}", report.files_added));
        let _ = self
            .term
            .write_line(&format!("  Files stamped:    {}", report.files_stamped));
        let _ = self
            .term
            .write_line(&format!("  Search prefix:    {}", report.search_prefix));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.bytes_compressed)
        ));
        if report.files_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Files skipped:    {}", report.files_skipped));
        }
        let _ = self
            .term
            .write_line(&format!("  Duration:         {:?}", report.duration));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&Self::created_line(output_path));

        if self.verbose {
            self.write_summary(report);
        }

        for warning in &report.warnings {
            self.format_warning(warning);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode. `{:#}` prints the context
        // chain without a backtrace.
        if console::colors_enabled_stderr() {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("Error:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("Error: {error:#}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if console::colors_enabled_stderr() {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
