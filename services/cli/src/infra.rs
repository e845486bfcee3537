use chrono::NaiveDate;
use portfolio_health::error::AppError;
use portfolio_health::scoring::{Risk, RiskSeverity};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parse `severity:probability`, e.g. `high:0.4`.
pub(crate) fn parse_inline_risk(raw: &str) -> Result<Risk, String> {
    let (severity, probability) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected SEVERITY:PROBABILITY, got '{raw}'"))?;
    let probability = probability
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid probability in '{raw}' ({err})"))?;
    Ok(Risk::new(RiskSeverity::parse_lenient(severity), probability))
}

pub(crate) fn read_json<T, P>(path: P) -> Result<T, AppError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}
