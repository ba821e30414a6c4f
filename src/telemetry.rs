use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global tracing subscriber
///
/// Filtering follows `RUST_LOG`, falling back to `info`. Output goes to stderr
/// so stdout carries only program output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
