//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. `RUST_LOG` wins when set;
/// otherwise `verbose` switches the crate between debug and warn output.
pub fn init(verbose: bool) {
    let default = if verbose {
        "image_dedupe=debug"
    } else {
        "image_dedupe=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
