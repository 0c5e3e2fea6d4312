use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::recommend::{WeightConfig, WeightConfigError, DEFAULT_TOP_N};

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

/// Top-level configuration for the recommendation service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub recommend: RecommendConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let recommend = RecommendConfig::load()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            recommend,
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

/// Tunables consumed by the recommendation pipeline: the default result bound
/// and the five feature weights. The weights ship with the marketplace
/// defaults and may be overridden per deployment through `RECOMMEND_WEIGHT_*`
/// variables; they are validated once here and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    pub default_top_n: usize,
    pub weights: WeightConfig,
}

impl RecommendConfig {
    fn load() -> Result<Self, ConfigError> {
        let default_top_n = match env::var("RECOMMEND_TOP_N_DEFAULT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopN)?,
            Err(_) => DEFAULT_TOP_N,
        };

        let mut weights = WeightConfig::default();
        weights.rating = weight_var("RECOMMEND_WEIGHT_RATING", weights.rating)?;
        weights.acceptance_rate =
            weight_var("RECOMMEND_WEIGHT_ACCEPTANCE", weights.acceptance_rate)?;
        weights.success_rate = weight_var("RECOMMEND_WEIGHT_SUCCESS", weights.success_rate)?;
        weights.skill_match = weight_var("RECOMMEND_WEIGHT_SKILL_MATCH", weights.skill_match)?;
        weights.price = weight_var("RECOMMEND_WEIGHT_PRICE", weights.price)?;
        weights.validate()?;

        Ok(Self {
            default_top_n,
            weights,
        })
    }
}

fn weight_var(name: &'static str, fallback: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidWeight { name }),
        Err(_) => Ok(fallback),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopN,
    InvalidWeight { name: &'static str },
    Weights(WeightConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopN => {
                write!(f, "RECOMMEND_TOP_N_DEFAULT must be a non-negative integer")
            }
            ConfigError::InvalidWeight { name } => {
                write!(f, "{name} must parse to a decimal weight")
            }
            ConfigError::Weights(err) => write!(f, "weight configuration rejected: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidTopN
            | ConfigError::InvalidWeight { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Weights(err) => Some(err),
        }
    }
}

impl From<WeightConfigError> for ConfigError {
    fn from(value: WeightConfigError) -> Self {
        Self::Weights(value)
    }
}
