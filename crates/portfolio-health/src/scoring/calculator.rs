use super::domain::{
    HealthAssessment, HealthRating, ProjectStatus, Risk, RiskSeverity, ScoreComponent,
};
use super::factors::{FactorTable, PROBABILITY_WEIGHT, SEVERITY_FACTORS, STATUS_FACTORS};

const BASELINE_SCORE: f64 = 100.0;

/// Stateless scorer folding a project's status and risk snapshot into a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScoreCalculator {
    status_factors: FactorTable,
    severity_factors: FactorTable,
}

impl Default for HealthScoreCalculator {
    fn default() -> Self {
        Self::standard()
    }
}

impl HealthScoreCalculator {
    pub const fn standard() -> Self {
        Self {
            status_factors: STATUS_FACTORS,
            severity_factors: SEVERITY_FACTORS,
        }
    }

    pub fn status_factor(&self, status: &ProjectStatus) -> f64 {
        factor_for(&self.status_factors, status.is_recognized(), status.label()).0
    }

    pub fn severity_factor(&self, severity: &RiskSeverity) -> f64 {
        factor_for(&self.severity_factors, severity.is_recognized(), severity.label()).0
    }

    /// Multiplier contributed by a single risk. Probability is used as given.
    pub fn risk_multiplier(&self, risk: &Risk) -> f64 {
        self.severity_factor(&risk.severity) * (1.0 - risk.probability * PROBABILITY_WEIGHT)
    }

    pub fn score(&self, status: &ProjectStatus, risks: &[Risk]) -> u8 {
        let raw = risks.iter().fold(
            BASELINE_SCORE * self.status_factor(status),
            |score, risk| score * self.risk_multiplier(risk),
        );
        finalize(raw)
    }

    /// Same score as [`score`](Self::score), with one component per applied factor.
    pub fn assess(&self, status: &ProjectStatus, risks: &[Risk]) -> HealthAssessment {
        let mut components = Vec::with_capacity(risks.len() + 1);

        let (status_factor, status_fallback) =
            factor_for(&self.status_factors, status.is_recognized(), status.label());
        components.push(ScoreComponent {
            label: format!("status {}", status.label()),
            factor: status_factor,
            fallback: status_fallback,
        });

        let mut raw = BASELINE_SCORE * status_factor;
        for (index, risk) in risks.iter().enumerate() {
            let (severity_factor, severity_fallback) = factor_for(
                &self.severity_factors,
                risk.severity.is_recognized(),
                risk.severity.label(),
            );
            let factor = severity_factor * (1.0 - risk.probability * PROBABILITY_WEIGHT);
            raw *= factor;
            components.push(ScoreComponent {
                label: format!(
                    "risk #{} {} @ {:.2}",
                    index + 1,
                    risk.severity.label(),
                    risk.probability
                ),
                factor,
                fallback: severity_fallback,
            });
        }

        let score = finalize(raw);
        HealthAssessment {
            score,
            rating: HealthRating::from_score(score),
            components,
        }
    }
}

fn factor_for(table: &FactorTable, recognized: bool, label: &str) -> (f64, bool) {
    let entry = if recognized { table.get(label) } else { None };
    match entry {
        Some(factor) => (factor, false),
        None => (table.default_factor(), true),
    }
}

/// Clamp to `[0, 100]` and round half away from zero. NaN collapses to 0.
fn finalize(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, BASELINE_SCORE).round() as u8
}

/// Score a project with the standard factor tables.
pub fn compute_health_score(status: &ProjectStatus, risks: &[Risk]) -> u8 {
    HealthScoreCalculator::standard().score(status, risks)
}
