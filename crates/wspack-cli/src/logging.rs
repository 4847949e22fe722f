//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays reserved for results. `RUST_LOG`
//! overrides the level chosen from the verbosity flags.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps `--verbose` / `--quiet` to a default log level.
pub const fn level_for(verbose: bool, quiet: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Installs the global subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let default = level_for(verbose, quiet);
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    // try_init so a second call (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true, false), Level::DEBUG);
        assert_eq!(level_for(false, true), Level::ERROR);
        assert_eq!(level_for(false, false), Level::WARN);
    }
}
