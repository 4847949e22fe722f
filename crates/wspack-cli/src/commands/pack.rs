//! Pack command implementation.

use crate::cli::PackArgs;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use wspack_core::NoopProgress;
use wspack_core::pack_directory_with_progress;

pub fn execute(
    args: &PackArgs,
    formatter: &dyn OutputFormatter,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let config = args.to_config();

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if !quiet && !json && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        add_pack_context(
            pack_directory_with_progress(&config, &mut progress),
            &config.output,
        )?
    } else {
        let mut noop = NoopProgress;
        add_pack_context(
            pack_directory_with_progress(&config, &mut noop),
            &config.output,
        )?
    };

    formatter.format_pack_result(&config.output, &report)?;

    Ok(())
}
