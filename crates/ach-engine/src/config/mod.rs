use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::analysis::{AchEngine, Scale, ScaleKind, WeightingMode};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scale_kind = match env::var("ACH_SCALE") {
            Ok(value) => {
                ScaleKind::parse(&value).ok_or(ConfigError::InvalidScale { value })?
            }
            Err(_) => ScaleKind::Logarithmic,
        };

        let weighting = match env::var("ACH_WEIGHTING") {
            Ok(value) => {
                WeightingMode::parse(&value).ok_or(ConfigError::InvalidWeighting { value })?
            }
            Err(_) => WeightingMode::Identity,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                scale: scale_kind.preset(),
                weighting,
            },
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

/// Default scale and weighting applied when a request does not override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub scale: Scale,
    pub weighting: WeightingMode,
}

impl ScoringConfig {
    pub fn engine(&self) -> AchEngine {
        AchEngine::with_mode(self.scale, self.weighting)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            weighting: WeightingMode::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScale { value: String },
    InvalidWeighting { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScale { value } => write!(
                f,
                "ACH_SCALE must be 'linear' or 'logarithmic', got '{}'",
                value
            ),
            ConfigError::InvalidWeighting { value } => write!(
                f,
                "ACH_WEIGHTING must be 'identity', 'sats' or 'explicit', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidScale { .. }
            | ConfigError::InvalidWeighting { .. } => None,
        }
    }
}
