/// Neutral weight applied to any category missing from a table.
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Share of a risk's probability that is taken off its multiplier.
pub const PROBABILITY_WEIGHT: f64 = 0.1;

/// Immutable label-to-weight table with an explicit fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorTable {
    entries: &'static [(&'static str, f64)],
    default: f64,
}

impl FactorTable {
    pub const fn new(entries: &'static [(&'static str, f64)], default: f64) -> Self {
        Self { entries, default }
    }

    /// Factor for `label`, or `None` when the table has no entry.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, factor)| *factor)
    }

    pub fn lookup(&self, label: &str) -> f64 {
        self.get(label).unwrap_or(self.default)
    }

    pub fn default_factor(&self) -> f64 {
        self.default
    }

    pub fn entries(&self) -> &'static [(&'static str, f64)] {
        self.entries
    }
}

pub const STATUS_FACTORS: FactorTable = FactorTable::new(
    &[
        ("planned", 1.0),
        ("active", 0.9),
        ("at-risk", 0.7),
        ("delayed", 0.6),
        ("completed", 1.0),
    ],
    NEUTRAL_FACTOR,
);

pub const SEVERITY_FACTORS: FactorTable = FactorTable::new(
    &[
        ("low", 0.95),
        ("medium", 0.85),
        ("high", 0.7),
        ("critical", 0.5),
    ],
    NEUTRAL_FACTOR,
);
