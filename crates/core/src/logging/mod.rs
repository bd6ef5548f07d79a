//! Process-wide logging setup.
//!
//! Components only emit `tracing` events; whichever subscriber is in scope
//! receives them. The owning process calls [`init_logging`] once before any
//! work starts. Repeat calls are no-ops.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "YARGEN_LOG";

static INIT: Once = Once::new();

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Emit debug-level events on stderr instead of info-level.
    pub verbose: bool,
    /// Also append events to this file.
    pub log_file: Option<PathBuf>,
}

/// Install the global subscriber.
///
/// Console output always goes to stderr, at debug level when `verbose` is set
/// and info otherwise. When `log_file` is set, events are also
/// appended there with timestamps. `YARGEN_LOG` overrides the level filter.
pub fn init_logging(options: &LogOptions) -> Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| result = install(options));
    result
}

fn install(options: &LogOptions) -> Result<()> {
    let default_level = if options.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer().with_writer(std::io::stderr).with_target(false).compact();

    let file_layer = match &options.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
