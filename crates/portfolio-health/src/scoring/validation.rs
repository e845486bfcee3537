use serde::{Deserialize, Serialize};

use super::domain::Risk;

/// How risk probabilities are checked before scoring.
///
/// The calculator itself never validates; this policy is applied at ingestion
/// edges (risk register import, command line) so existing callers keep the
/// never-fails contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    #[default]
    Lenient,
    Strict,
}

impl ProbabilityPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub fn apply(self, risks: &[Risk]) -> Result<(), ValidationError> {
        match self {
            Self::Lenient => Ok(()),
            Self::Strict => validate_risks(risks),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("risk #{position} probability {probability} is outside [0, 1]")]
    ProbabilityOutOfRange { position: usize, probability: f64 },
}

/// Reject any probability that is non-finite or outside `[0, 1]`.
pub fn validate_risks(risks: &[Risk]) -> Result<(), ValidationError> {
    for (index, risk) in risks.iter().enumerate() {
        if !(0.0..=1.0).contains(&risk.probability) {
            return Err(ValidationError::ProbabilityOutOfRange {
                position: index + 1,
                probability: risk.probability,
            });
        }
    }
    Ok(())
}
