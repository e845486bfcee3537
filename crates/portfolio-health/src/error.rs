use crate::config::ConfigError;
use crate::rules::RuleError;
use crate::scoring::{RiskRegisterError, ValidationError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    RiskRegister(RiskRegisterError),
    Validation(ValidationError),
    Rule(RuleError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid JSON input: {}", err),
            AppError::RiskRegister(err) => write!(f, "risk register error: {}", err),
            AppError::Validation(err) => write!(f, "invalid risk input: {}", err),
            AppError::Rule(err) => write!(f, "rule configuration error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::RiskRegister(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Rule(err) => Some(err),
        }
    }
}

impl AppError {
    /// Process exit code: 2 for bad input or rule configuration, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Json(_)
            | AppError::RiskRegister(_)
            | AppError::Validation(_)
            | AppError::Rule(_) => 2,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => 1,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RiskRegisterError> for AppError {
    fn from(value: RiskRegisterError) -> Self {
        Self::RiskRegister(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RuleError> for AppError {
    fn from(value: RuleError) -> Self {
        Self::Rule(value)
    }
}
