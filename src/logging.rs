//! Structured logging setup.

use crate::config::{ConfigError, ConfigService, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` is used as the filter.
pub fn init(config: &ConfigService) -> Result<(), ConfigError> {
    let level = config.log_level();
    let format = config.log_format()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init(),
    }

    tracing::info!(level = %level, format = ?format, "Logging initialized");
    Ok(())
}
