use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::offers::{OwnerId, DEFAULT_PRESELECT_COUNT};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the CompareOffer service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub sessions: SessionConfig,
    pub comparison: ComparisonConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sessions = match env::var("APP_SESSION_TOKENS") {
            Ok(raw) => SessionConfig::parse(&raw)?,
            Err(_) => SessionConfig::default(),
        };

        let preselect_count = match env::var("APP_COMPARE_PRESELECT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidPreselect)?,
            Err(_) => DEFAULT_PRESELECT_COUNT,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            sessions,
            comparison: ComparisonConfig { preselect_count },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter fallback used when `RUST_LOG` is unset.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Session tokens accepted by the bundled static identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub tokens: BTreeMap<String, OwnerId>,
}

impl SessionConfig {
    /// Parse `token=owner` pairs separated by commas. Blank entries are skipped.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut tokens = BTreeMap::new();
        for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (token, owner) = entry
                .split_once('=')
                .map(|(token, owner)| (token.trim(), owner.trim()))
                .filter(|(token, owner)| !token.is_empty() && !owner.is_empty())
                .ok_or_else(|| ConfigError::InvalidSessionToken {
                    entry: entry.to_string(),
                })?;
            tokens.insert(token.to_string(), OwnerId(owner.to_string()));
        }
        Ok(Self { tokens })
    }
}

/// Defaults applied to comparison requests.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub preselect_count: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            preselect_count: DEFAULT_PRESELECT_COUNT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPreselect,
    InvalidSessionToken { entry: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPreselect => {
                write!(f, "APP_COMPARE_PRESELECT must be a non-negative integer")
            }
            ConfigError::InvalidSessionToken { entry } => write!(
                f,
                "APP_SESSION_TOKENS entry '{entry}' must look like token=owner"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
