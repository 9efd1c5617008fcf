//! Tracing setup for applications embedding the query layer

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::QueryError;

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a global subscriber filtered by `RUST_LOG`, falling back to `level`.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<(), QueryError> {
    let level: tracing::Level = level
        .parse()
        .map_err(|_| QueryError::Telemetry(format!("invalid log level {:?}", level)))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()
        .map_err(|err| QueryError::Telemetry(err.to_string()))
}
