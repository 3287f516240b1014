use crate::workflows::lifespan::ValidationPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub estimator: EstimatorConfig,
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
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mobile_country_code = env::var("LIFESPAN_MOBILE_COUNTRY_CODE")
            .map(|value| value.trim().trim_start_matches('+').to_string())
            .unwrap_or_else(|_| "91".to_string());
        if mobile_country_code.is_empty()
            || mobile_country_code.len() > 3
            || !mobile_country_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::InvalidCountryCode {
                value: mobile_country_code,
            });
        }

        let processing_delay_ms = match env::var("LIFESPAN_PROCESSING_DELAY_MS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidProcessingDelay { value })?,
            Err(_) => 0,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            estimator: EstimatorConfig {
                mobile_country_code,
                processing_delay_ms,
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
    pub ansi: bool,
}

/// Questionnaire gate and scoring presentation settings.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Digits after `+` that every mobile number must start with.
    pub mobile_country_code: String,
    /// Cosmetic pause before a calculation is returned.
    pub processing_delay_ms: u64,
}

impl EstimatorConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn validation_policy(&self) -> Result<ValidationPolicy, ConfigError> {
        ValidationPolicy::new(&self.mobile_country_code)
            .map_err(|source| ConfigError::MobilePattern { source })
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            mobile_country_code: "91".to_string(),
            processing_delay_ms: 0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCountryCode { value: String },
    InvalidProcessingDelay { value: String },
    MobilePattern { source: regex::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCountryCode { value } => write!(
                f,
                "LIFESPAN_MOBILE_COUNTRY_CODE must be 1-3 digits, got '{}'",
                value
            ),
            ConfigError::InvalidProcessingDelay { value } => write!(
                f,
                "LIFESPAN_PROCESSING_DELAY_MS must be a whole number of milliseconds, got '{}'",
                value
            ),
            ConfigError::MobilePattern { .. } => {
                write!(f, "unable to build the mobile number pattern")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::MobilePattern { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCountryCode { .. }
            | ConfigError::InvalidProcessingDelay { .. } => None,
        }
    }
}
