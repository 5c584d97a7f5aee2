use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

use crate::config::{LogFormat, LoggingConfig};

/// Target prefix of every event the decoder emits
const DECODER_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter directive scoping the configured level to the decoder's events
pub fn filter_directive(config: &LoggingConfig) -> String {
    format!("{}={}", DECODER_TARGET, config.level)
}

/// Install a global subscriber for the decoder's events
///
/// Only decode events pass by default; `RUST_LOG` replaces the filter when
/// set. Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let layer = match config.format {
        // One JSON object per decode with id, model and choices as top-level keys
        LogFormat::Json => fmt::layer().json().flatten_event(true).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    tracing::debug!(directive = %filter_directive(config), "Decoder logging initialized");
    Ok(())
}
