//! Logging and tracing setup

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt, EnvFilter};

use crate::config::ServiceConfig;

/// Initialize logging from the service configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn initialize_logging(config: &ServiceConfig) -> Result<()> {
    initialize_logging_with_config(config.effective_log_level(), &config.logging.format)
}

/// Initialize logging with an explicit level and format (json, pretty, compact)
pub fn initialize_logging_with_config(level: &str, format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = match format {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .boxed(),
        _ => fmt::layer().compact().with_target(false).with_ansi(true).boxed(),
    };

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init()?;

    Ok(())
}
