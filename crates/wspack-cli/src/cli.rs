//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use wspack_core::PackConfig;
use wspack_core::PrefixMatch;
use wspack_core::config::DEFAULT_OUTPUT;
use wspack_core::config::DEFAULT_SOURCE_DIR;
use wspack_core::config::DEFAULT_SUFFIX;

#[derive(Parser)]
#[command(name = "wspack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Package a directory into a ZIP archive
    Pack(PackArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Directory to package
    #[arg(value_name = "SOURCE", default_value = DEFAULT_SOURCE_DIR)]
    pub source: PathBuf,

    /// Output archive file path
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Suffix appended to the source directory name to select stamped files
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Insert a path separator between directory name and suffix
    #[arg(long)]
    pub segment_match: bool,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Fail instead of replacing an existing archive
    #[arg(short = 'n', long)]
    pub no_clobber: bool,
}

impl PackArgs {
    /// Maps command-line flags onto a packaging configuration.
    pub fn to_config(&self) -> PackConfig {
        let mode = if self.segment_match {
            PrefixMatch::Segment
        } else {
            PrefixMatch::Literal
        };

        let config = PackConfig::new(&self.source, &self.output)
            .with_suffix(self.suffix.clone())
            .with_match_mode(mode)
            .with_follow_symlinks(self.follow_symlinks)
            .with_overwrite(!self.no_clobber);

        match self.compression_level {
            Some(level) => config.with_compression_level(level),
            None => config,
        }
    }
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
