//! Logging Setup
//!
//! Installs the global `tracing` subscriber from the `[logging]` section.
//! `RUST_LOG` still wins over the configured level, so individual modules can
//! be turned up without editing the config file.

use anyhow::{Context, Result};
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Level to log at; `verbose` forces `debug` regardless of the configured level
pub fn default_level(config: &LoggingConfig, verbose: bool) -> Result<Level> {
    if verbose {
        return Ok(Level::DEBUG);
    }
    config
        .level
        .to_lowercase()
        .parse::<Level>()
        .map_err(|e| anyhow::anyhow!("Failed to parse log level: {}", e))
}

/// Filter with the default level as directive, refined by `RUST_LOG`
pub fn build_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(default_level(config, verbose)?.into())
        .from_env_lossy())
}

/// Subscriber in the configured format, writing to `writer`
pub fn build_subscriber<W>(
    config: &LoggingConfig,
    filter: EnvFilter,
    writer: W,
) -> Result<Box<dyn Subscriber + Send + Sync>>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    Ok(match config.format.to_lowercase().as_str() {
        "json" => Box::new(builder.json().finish()),
        "pretty" => Box::new(builder.pretty().finish()),
        _ => Box::new(builder.compact().finish()),
    })
}

/// Install the global subscriber, logging to stderr
///
/// stdout stays free for command output.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_filter(config, verbose)?;
    let subscriber = build_subscriber(config, filter, std::io::stderr)?;
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
