use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use super::domain::{Risk, RiskSeverity};
use super::validation::{ProbabilityPolicy, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RiskRegisterError {
    #[error("failed to read risk register: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid risk register CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: probability '{value}' is not a number")]
    InvalidProbability { row: usize, value: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One row of an exported project risk register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRegisterEntry {
    pub title: String,
    pub severity: RiskSeverity,
    pub probability: f64,
    pub identified_on: Option<NaiveDate>,
}

impl RiskRegisterEntry {
    pub fn risk(&self) -> Risk {
        Risk {
            severity: self.severity.clone(),
            probability: self.probability,
        }
    }
}

/// Risk snapshot imported from a CSV export with `Title`, `Severity`,
/// `Probability` and optional `Identified On` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskRegister {
    pub entries: Vec<RiskRegisterEntry>,
}

impl RiskRegister {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        policy: ProbabilityPolicy,
    ) -> Result<Self, RiskRegisterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, policy)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        policy: ProbabilityPolicy,
    ) -> Result<Self, RiskRegisterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<RegisterRow>().enumerate() {
            let row = record?;
            let probability = row.probability.parse::<f64>().map_err(|_| {
                RiskRegisterError::InvalidProbability {
                    row: index + 1,
                    value: row.probability.clone(),
                }
            })?;

            let severity = RiskSeverity::parse_lenient(&row.severity);
            if !severity.is_recognized() {
                warn!(
                    row = index + 1,
                    severity = %row.severity,
                    "unrecognized severity, scoring with neutral factor"
                );
            }

            let identified_on = row.identified_on.as_deref().and_then(|raw| {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    warn!(
                        row = index + 1,
                        identified_on = %raw,
                        "unparseable identified-on date, leaving it blank"
                    );
                }
                parsed
            });

            entries.push(RiskRegisterEntry {
                title: row.title,
                severity,
                probability,
                identified_on,
            });
        }

        let register = Self { entries };
        policy.apply(&register.risks())?;
        debug!(risks = register.entries.len(), "risk register loaded");
        Ok(register)
    }

    pub fn risks(&self) -> Vec<Risk> {
        self.entries.iter().map(RiskRegisterEntry::risk).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RegisterRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Severity")]
    severity: String,
    #[serde(rename = "Probability")]
    probability: String,
    #[serde(
        rename = "Identified On",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    identified_on: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("log buffer poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log buffer poisoned")).into_owned()
        }
    }

    const REGISTER: &str = "\
Title,Severity,Probability,Identified On
Vendor insolvency,critical,0.2,2026-03-14
Data migration slip,High,0.5,
Accessibility audit,unknown-tier,0.1,not a date
";

    #[test]
    fn parses_rows_and_normalizes_severity() {
        let register = RiskRegister::from_reader(REGISTER.as_bytes(), ProbabilityPolicy::Lenient)
            .expect("register parses");

        assert_eq!(register.entries.len(), 3);
        assert_eq!(register.entries[0].severity, RiskSeverity::Critical);
        assert_eq!(
            register.entries[0].identified_on,
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
        assert_eq!(register.entries[1].severity, RiskSeverity::High);
        assert_eq!(register.entries[1].identified_on, None);
        assert!(!register.entries[2].severity.is_recognized());
        assert_eq!(register.entries[2].identified_on, None);
        assert_eq!(register.risks()[1], Risk::new("high", 0.5));
    }

    #[test]
    fn unparseable_identified_on_is_logged_with_row() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let register = tracing::subscriber::with_default(subscriber, || {
            RiskRegister::from_reader(REGISTER.as_bytes(), ProbabilityPolicy::Lenient)
        })
        .expect("register parses");

        assert_eq!(register.entries[2].identified_on, None);
        let output = logs.contents();
        assert!(output.contains("unparseable identified-on date"));
        assert!(output.contains("row=3"));
        assert!(output.contains("not a date"));
    }

    #[test]
    fn reports_unparseable_probability_with_row() {
        let csv = "Title,Severity,Probability\nScope creep,medium,likely\n";
        let err = RiskRegister::from_reader(csv.as_bytes(), ProbabilityPolicy::Lenient)
            .expect_err("bad probability rejected");
        match err {
            RiskRegisterError::InvalidProbability { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "likely");
            }
            other => panic!("expected invalid probability, got {other:?}"),
        }
    }

    #[test]
    fn strict_policy_rejects_percentages() {
        let csv = "Title,Severity,Probability\nScope creep,medium,40\n";
        assert!(RiskRegister::from_reader(csv.as_bytes(), ProbabilityPolicy::Lenient).is_ok());

        let err = RiskRegister::from_reader(csv.as_bytes(), ProbabilityPolicy::Strict)
            .expect_err("strict policy enforces fractions");
        assert!(matches!(err, RiskRegisterError::Validation(_)));
    }

    #[test]
    fn header_only_register_is_empty() {
        let register = RiskRegister::from_reader(
            "Title,Severity,Probability\n".as_bytes(),
            ProbabilityPolicy::Strict,
        )
        .expect("empty register parses");
        assert!(register.is_empty());
    }
}
