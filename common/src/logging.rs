use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;
use crate::error::LoggingError;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Output goes to stderr so command output on stdout stays machine-readable.
pub fn init(config: &TelemetryConfig) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| LoggingError::Filter {
            value: config.log_level.clone(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(LoggingError::Subscriber)
}
