//! Leveled logging on top of `tracing`.
//!
//! Messages are built from any number of `Display` arguments. The exact
//! message `???` is a placeholder produced by callers with nothing to say
//! and is dropped.

use crate::utils::stringify;
use std::fmt::{self, Display};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

const SENTINEL: &str = "???";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

/// Install the stderr subscriber. Filter comes from `RUST_LOG`, default `info`.
/// Later calls are no-ops.
pub fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// The message that would be emitted, or `None` for the sentinel.
#[must_use]
pub fn render(args: &[&dyn Display]) -> Option<String> {
    let message = stringify(args);
    (message != SENTINEL).then_some(message)
}

/// Emit `args` at `level`. Returns whether anything was emitted.
pub fn log(level: Level, args: &[&dyn Display]) -> bool {
    let Some(message) = render(args) else {
        return false;
    };
    match level {
        Level::Info => tracing::info!("{}", message),
        Level::Debug => tracing::debug!("{}", message),
        Level::Warn => tracing::warn!("{}", message),
        Level::Error => tracing::error!("{}", message),
    }
    true
}

pub fn info(args: &[&dyn Display]) -> bool {
    log(Level::Info, args)
}

pub fn debug(args: &[&dyn Display]) -> bool {
    log(Level::Debug, args)
}

pub fn warn(args: &[&dyn Display]) -> bool {
    log(Level::Warn, args)
}

pub fn error(args: &[&dyn Display]) -> bool {
    log(Level::Error, args)
}
