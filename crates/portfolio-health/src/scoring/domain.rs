use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery status of a project as reported by the portfolio store.
///
/// Labels outside the known set are preserved as `Unrecognized` rather than
/// rejected, so new statuses introduced upstream never break scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Planned,
    Active,
    AtRisk,
    Delayed,
    Completed,
    Unrecognized(String),
}

impl ProjectStatus {
    pub const fn known() -> [Self; 5] {
        [
            Self::Planned,
            Self::Active,
            Self::AtRisk,
            Self::Delayed,
            Self::Completed,
        ]
    }

    /// Exact label match; anything else is kept as `Unrecognized`.
    pub fn from_label(value: &str) -> Self {
        match value {
            "planned" => Self::Planned,
            "active" => Self::Active,
            "at-risk" => Self::AtRisk,
            "delayed" => Self::Delayed,
            "completed" => Self::Completed,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    /// Input-edge parsing: trims, lowercases and accepts `at_risk`.
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match Self::from_label(&normalized) {
            Self::Unrecognized(_) => Self::Unrecognized(value.to_string()),
            known => known,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::AtRisk => "at-risk",
            Self::Delayed => "delayed",
            Self::Completed => "completed",
            Self::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<&str> for ProjectStatus {
    fn from(value: &str) -> Self {
        Self::from_label(value)
    }
}

impl From<ProjectStatus> for String {
    fn from(value: ProjectStatus) -> Self {
        match value {
            ProjectStatus::Unrecognized(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Impact class of a single project risk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
    Unrecognized(String),
}

impl RiskSeverity {
    pub const fn known() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// Exact label match; anything else is kept as `Unrecognized`.
    pub fn from_label(value: &str) -> Self {
        match value {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    /// Input-edge parsing: trims and lowercases before matching.
    pub fn parse_lenient(value: &str) -> Self {
        match Self::from_label(&value.trim().to_ascii_lowercase()) {
            Self::Unrecognized(_) => Self::Unrecognized(value.to_string()),
            known => known,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for RiskSeverity {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<&str> for RiskSeverity {
    fn from(value: &str) -> Self {
        Self::from_label(value)
    }
}

impl From<RiskSeverity> for String {
    fn from(value: RiskSeverity) -> Self {
        match value {
            RiskSeverity::Unrecognized(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of one risk owned by a project. `probability` is a fraction in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub severity: RiskSeverity,
    pub probability: f64,
}

impl Risk {
    pub fn new(severity: impl Into<RiskSeverity>, probability: f64) -> Self {
        Self {
            severity: severity.into(),
            probability,
        }
    }
}

/// Display band for a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    OnTrack,
    NeedsAttention,
    Critical,
}

impl HealthRating {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::OnTrack,
            60..=79 => Self::NeedsAttention,
            _ => Self::Critical,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::NeedsAttention => "needs attention",
            Self::Critical => "critical",
        }
    }
}

/// One multiplicative step applied while computing a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub label: String,
    pub factor: f64,
    /// Set when the neutral default stood in for an unrecognized category.
    pub fallback: bool,
}

/// Score plus the audit trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub score: u8,
    pub rating: HealthRating,
    pub components: Vec<ScoreComponent>,
}

impl HealthAssessment {
    pub fn used_fallback(&self) -> bool {
        self.components.iter().any(|component| component.fallback)
    }
}
