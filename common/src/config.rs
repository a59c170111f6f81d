use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::storage::DEFAULT_CATALOG_FILE;

pub const DEFAULT_API_URL: &str = "https://api.hh.ru/vacancies";
pub const DEFAULT_AREA: u32 = 113;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_USER_AGENT: &str = concat!("vacancies-catalog/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

/// Top-level configuration, assembled from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = env::var("VACANCIES_FILE").unwrap_or_else(|_| DEFAULT_CATALOG_FILE.to_string());

        let per_page = parse_var("HH_PER_PAGE", DEFAULT_PER_PAGE)?;
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ConfigError::PerPageOutOfRange(per_page));
        }

        let api = ApiConfig {
            base_url: env::var("HH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            area: parse_var("HH_AREA", DEFAULT_AREA)?,
            per_page,
            user_agent: env::var("HH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(parse_var("HH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
        };

        let addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .map_err(|source| ConfigError::InvalidServerAddr {
                value: addr.clone(),
                source,
            })?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            storage: StorageConfig {
                path: PathBuf::from(path),
            },
            api,
            server: ServerConfig { addr },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the catalog file.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

/// Settings for the hh.ru listings client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// hh.ru region id: 113 is Russia, 1 Moscow, 2 Saint Petersburg.
    pub area: u32,
    pub per_page: u32,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            area: DEFAULT_AREA,
            per_page: DEFAULT_PER_PAGE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}
