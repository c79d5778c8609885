//! Tracing subscriber setup for the `kanban` binary

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Log level selected by the global flags. `quiet` beats `debug` beats `verbose`.
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

fn filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("hyper=warn,reqwest=warn,{level}"))
}

/// Install the global subscriber, writing to stderr
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    let level = log_level(verbose, debug, quiet);
    registry()
        .with(filter(level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
