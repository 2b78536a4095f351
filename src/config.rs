//! # Configuration
//!
//! Typed engine configuration with defaults and environment overrides.
//!
//! Values are read from environment variables prefixed with `QUOTATION_`,
//! nested keys separated by `__`, after an optional `.env` file has been
//! loaded:
//!
//! ```text
//! QUOTATION_WORKER_COUNT=4
//! QUOTATION_RESULT_TIMEOUT_MS=30000
//! QUOTATION_TIER_PRODUCT_IDS=1,5,3
//! QUOTATION_SERVICE__BASE_URL=http://rating.internal:8080
//! QUOTATION_LOGGING__FORMAT=json
//! ```
//!
//! # Examples
//!
//! ```
//! use policy_quotation::config::QuotationConfig;
//!
//! let config = QuotationConfig::default();
//! assert_eq!(config.worker_count, 4);
//! assert!(config.validate().is_ok());
//! ```

use crate::application::services::dispatcher::DEFAULT_RESULT_TIMEOUT_MS;
use crate::application::services::retry::INVALID_PROMOTION_CODE;
use crate::domain::value_objects::ProductId;
use config::{Config, Environment, Map};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "QUOTATION";

/// Configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized.
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// A value is out of range.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// Multi-line human-readable output.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `policy_quotation=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Remote rating service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the rating service.
    pub base_url: String,
    /// HTTP client timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Quotation engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationConfig {
    /// Size of the shared worker pool.
    pub worker_count: usize,
    /// Per-result wait in the dispatcher, in milliseconds.
    pub result_timeout_ms: u64,
    /// Tasks admitted (running plus waiting) before submissions are rejected.
    pub queue_capacity: usize,
    /// Service error code that triggers the promotional-code retry.
    pub invalid_promotion_code: String,
    /// Products the tier coefficients are keyed to, in string order.
    pub tier_product_ids: Vec<i64>,
    /// Let the service apply automatic promotions.
    pub automatic_promotions: bool,
    /// Rating service.
    pub service: ServiceConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Default for QuotationConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            result_timeout_ms: DEFAULT_RESULT_TIMEOUT_MS,
            queue_capacity: 64,
            invalid_promotion_code: INVALID_PROMOTION_CODE.to_string(),
            tier_product_ids: vec![1, 5, 3],
            automatic_promotions: true,
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl QuotationConfig {
    /// Loads `.env` when present, then the process environment over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }
        Self::from_environment(environment())
    }

    /// Loads overrides from an explicit variable map instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or a value is invalid.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(environment().source(Some(vars)))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::Validation(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.queue_capacity < self.worker_count {
            return Err(ConfigError::Validation(format!(
                "queue_capacity ({}) must be at least worker_count ({})",
                self.queue_capacity, self.worker_count
            )));
        }
        if self.result_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "result_timeout_ms must be positive".to_string(),
            ));
        }
        if self.invalid_promotion_code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid_promotion_code must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-result wait as a duration.
    #[must_use]
    pub fn result_timeout(&self) -> Duration {
        Duration::from_millis(self.result_timeout_ms)
    }

    /// Tier products as ids.
    #[must_use]
    pub fn tier_products(&self) -> Vec<ProductId> {
        self.tier_product_ids.iter().copied().map(ProductId::new).collect()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("tier_product_ids")
        .try_parsing(true)
}
