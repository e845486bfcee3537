use std::env;
use std::fmt;

use crate::scoring::ProbabilityPolicy;

/// Distinguishes runtime behavior for different stages of the dashboard.
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

/// Top-level configuration for the scoring tools.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let policy_value =
            env::var("HEALTH_PROBABILITY_POLICY").unwrap_or_else(|_| "lenient".to_string());
        let probability_policy = ProbabilityPolicy::parse(&policy_value)
            .ok_or(ConfigError::InvalidProbabilityPolicy(policy_value))?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            scoring: ScoringConfig { probability_policy },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Controls how risk inputs are checked before they reach the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringConfig {
    pub probability_policy: ProbabilityPolicy,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidProbabilityPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidProbabilityPolicy(value) => write!(
                f,
                "HEALTH_PROBABILITY_POLICY must be 'lenient' or 'strict' (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
