//! Health scoring and rule-condition evaluation for portfolio dashboards.
//!
//! Both cores are pure: [`scoring::compute_health_score`] folds a project's
//! status and risk snapshot into a 0-100 score, and [`rules::evaluate`] checks
//! a single field condition against a record. Neither ever fails; unknown
//! categories and missing fields degrade to neutral results.

pub mod config;
pub mod error;
pub mod rules;
pub mod scoring;
pub mod telemetry;
