//! Project health scoring.
//!
//! A score starts at 100, is scaled by the project's status factor and then by
//! one multiplier per risk (`severity_factor * (1 - probability * 0.1)`), and
//! is finally clamped to `[0, 100]` and rounded half away from zero. Unknown
//! statuses and severities use a neutral factor of 1.0 instead of failing.

mod calculator;
pub mod domain;
mod factors;
pub mod register;
mod validation;

pub use calculator::{compute_health_score, HealthScoreCalculator};
pub use domain::{
    HealthAssessment, HealthRating, ProjectStatus, Risk, RiskSeverity, ScoreComponent,
};
pub use factors::{
    FactorTable, NEUTRAL_FACTOR, PROBABILITY_WEIGHT, SEVERITY_FACTORS, STATUS_FACTORS,
};
pub use register::{RiskRegister, RiskRegisterEntry, RiskRegisterError};
pub use validation::{validate_risks, ProbabilityPolicy, ValidationError};
