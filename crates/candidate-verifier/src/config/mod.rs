use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::candidate::ThresholdPolicy;

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
    pub verification: VerificationConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            verification: VerificationConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the verification run: aggregation policy, simulated external
/// checks, and per-field latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    pub threshold_policy: ThresholdPolicy,
    pub simulate_external_checks: bool,
    pub field_latency: Duration,
    pub rng_seed: Option<u64>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            threshold_policy: ThresholdPolicy::CountAware,
            simulate_external_checks: false,
            field_latency: Duration::ZERO,
            rng_seed: None,
        }
    }
}

impl VerificationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let threshold_policy = match env::var("VERIFY_THRESHOLD_POLICY") {
            Ok(raw) => ThresholdPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidThresholdPolicy { value: raw })?,
            Err(_) => ThresholdPolicy::CountAware,
        };

        let simulate_external_checks = match env::var("VERIFY_SIMULATE_EXTERNAL") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "VERIFY_SIMULATE_EXTERNAL",
                value: raw,
            })?,
            Err(_) => false,
        };

        let latency_ms = env::var("VERIFY_LATENCY_MS")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidLatency)?;

        let rng_seed = env::var("VERIFY_RNG_SEED")
            .ok()
            .map(|raw| raw.parse::<u64>().map_err(|_| ConfigError::InvalidSeed))
            .transpose()?;

        Ok(Self {
            threshold_policy,
            simulate_external_checks,
            field_latency: Duration::from_millis(latency_ms),
            rng_seed,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThresholdPolicy { value: String },
    InvalidFlag { name: &'static str, value: String },
    InvalidLatency,
    InvalidSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThresholdPolicy { value } => write!(
                f,
                "VERIFY_THRESHOLD_POLICY must be 'count_aware' or 'simple' (found '{value}')"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag (found '{value}')")
            }
            ConfigError::InvalidLatency => {
                write!(f, "VERIFY_LATENCY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidSeed => write!(f, "VERIFY_RNG_SEED must be a valid u64"),
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
