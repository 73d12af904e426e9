//! Diagnostic logging setup
//!
//! Engine internals emit `tracing` events; the CLI installs a compact
//! stderr subscriber filtered by `RUST_LOG`, falling back to `warn`, or
//! `debug` for mobin itself when `--verbose` is given.

use tracing_subscriber::{fmt, EnvFilter};

/// Default directive without `RUST_LOG`
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,mobin=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert!(default_directive(true).contains("mobin=debug"));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(false);
        init_logging(true);
    }
}
