use std::path::PathBuf;

/// Failures surfaced by the vacancy store.
///
/// A missing or unparsable catalog file is not an error; it reads as an empty
/// catalog.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write catalog {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("record #{index} in {} is malformed: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Invalid values in the environment-driven configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be an unsigned integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("HH_PER_PAGE must be between 1 and 100, got {0}")]
    PerPageOutOfRange(u32),
    #[error("SERVER_ADDR must be a socket address, got '{value}'")]
    InvalidServerAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Failures while installing the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log level/filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}
