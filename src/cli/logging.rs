//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::cli::args::Verbosity;

/// Build the log filter: `RUST_LOG` wins, otherwise the CLI verbosity.
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Install the global subscriber, logging to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Verbose);
    }
}
