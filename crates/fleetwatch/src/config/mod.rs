use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the monitoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub overview: OverviewConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("FLEETWATCH_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("FLEETWATCH_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("FLEETWATCH_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("FLEETWATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_top_n = env::var("FLEETWATCH_OVERVIEW_TOP_N")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidTopN)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            overview: OverviewConfig { default_top_n },
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Presentation defaults for the attention ranking.
#[derive(Debug, Clone)]
pub struct OverviewConfig {
    /// How many ranked centers the demo surfaces when the caller does not
    /// ask for a specific cut.
    pub default_top_n: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidTopN,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "FLEETWATCH_PORT must be a valid u16"),
            ConfigError::InvalidTopN => {
                write!(f, "FLEETWATCH_OVERVIEW_TOP_N must be a non-negative integer")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "FLEETWATCH_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTopN => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
