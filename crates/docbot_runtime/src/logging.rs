//! `tracing` subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the filter comes from the `-v` count.
//! Logs go to stderr so replies on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level.
#[must_use]
pub const fn directive_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "docbot=warn,docbot_runtime=warn,docbot_commands=warn,docbot_grammar=warn",
        1 => "docbot=info,docbot_runtime=info,docbot_commands=info,docbot_grammar=info",
        2 => "docbot=debug,docbot_runtime=debug,docbot_commands=debug,docbot_grammar=debug",
        _ => "docbot=trace,docbot_runtime=trace,docbot_commands=trace,docbot_grammar=trace",
    }
}

/// Installs the global subscriber.
///
/// Later calls are ignored, so tests and embedders may call this freely.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
