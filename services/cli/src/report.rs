use crate::infra::{parse_date, parse_inline_risk, read_json};
use chrono::{Local, NaiveDate};
use clap::Args;
use portfolio_health::config::ScoringConfig;
use portfolio_health::error::AppError;
use portfolio_health::rules::{Record, RuleDefinition, RuleSet, TriggeredAction};
use portfolio_health::scoring::{
    HealthAssessment, HealthScoreCalculator, ProbabilityPolicy, ProjectStatus, Risk, RiskRegister,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Project status (planned, active, at-risk, delayed, completed)
    #[arg(long)]
    pub(crate) status: String,
    /// Risk register CSV with Title, Severity, Probability columns
    #[arg(long)]
    pub(crate) risks: Option<PathBuf>,
    /// Additional risk as SEVERITY:PROBABILITY (repeatable)
    #[arg(long, value_parser = parse_inline_risk)]
    pub(crate) risk: Vec<Risk>,
    /// Reject probabilities outside [0, 1] regardless of configuration
    #[arg(long)]
    pub(crate) strict: bool,
    /// Assessment date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON object describing the record to check
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// JSON array of rule definitions
    #[arg(long)]
    pub(crate) rules: PathBuf,
    /// Entity type the record belongs to
    #[arg(long, default_value = "project")]
    pub(crate) entity: String,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

/// Health assessment for one project on a given day.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProjectHealthReport {
    pub(crate) status: ProjectStatus,
    pub(crate) assessed_on: NaiveDate,
    pub(crate) risk_count: usize,
    #[serde(flatten)]
    pub(crate) assessment: HealthAssessment,
}

pub(crate) fn run_score<W: Write>(
    args: ScoreArgs,
    scoring: &ScoringConfig,
    out: &mut W,
) -> Result<(), AppError> {
    let ScoreArgs {
        status,
        risks: register_path,
        risk: inline,
        strict,
        as_of,
        json,
    } = args;

    let policy = if strict {
        ProbabilityPolicy::Strict
    } else {
        scoring.probability_policy
    };

    let mut risks = match register_path {
        Some(path) => RiskRegister::from_path(path, policy)?.risks(),
        None => Vec::new(),
    };
    risks.extend(inline);
    policy.apply(&risks)?;

    let assessed_on = as_of.unwrap_or_else(|| Local::now().date_naive());
    let report = build_report(ProjectStatus::parse_lenient(&status), &risks, assessed_on);
    info!(
        status = %report.status,
        score = report.assessment.score,
        risks = report.risk_count,
        "project scored"
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        render_report(&report, out)?;
    }
    Ok(())
}

pub(crate) fn build_report(
    status: ProjectStatus,
    risks: &[Risk],
    assessed_on: NaiveDate,
) -> ProjectHealthReport {
    let assessment = HealthScoreCalculator::standard().assess(&status, risks);
    ProjectHealthReport {
        status,
        assessed_on,
        risk_count: risks.len(),
        assessment,
    }
}

pub(crate) fn render_report<W: Write>(
    report: &ProjectHealthReport,
    out: &mut W,
) -> Result<(), AppError> {
    writeln!(out, "Project health as of {}", report.assessed_on)?;
    writeln!(out, "- Status: {}", report.status)?;
    writeln!(out, "- Risks considered: {}", report.risk_count)?;
    writeln!(
        out,
        "- Score: {} ({})",
        report.assessment.score,
        report.assessment.rating.label()
    )?;
    if report.assessment.used_fallback() {
        writeln!(
            out,
            "- Note: unrecognized categories were scored with the neutral factor"
        )?;
    }
    writeln!(out, "Factors:")?;
    for component in &report.assessment.components {
        let note = if component.fallback {
            " (unrecognized, neutral)"
        } else {
            ""
        };
        writeln!(out, "  - {}: x{:.3}{}", component.label, component.factor, note)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct EvaluationSummary<'a> {
    entity: &'a str,
    rules_checked: usize,
    triggered: Vec<TriggeredAction>,
}

pub(crate) fn run_evaluate<W: Write>(args: EvaluateArgs, out: &mut W) -> Result<(), AppError> {
    let record: Record = read_json(&args.record)?;
    let definitions: Vec<RuleDefinition> = read_json(&args.rules)?;
    let rules = RuleSet::from_definitions(definitions)?;

    write_evaluation(&rules, &args.entity, &record, args.json, out)
}

pub(crate) fn write_evaluation<W: Write>(
    rules: &RuleSet,
    entity: &str,
    record: &Record,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    let triggered = rules.triggered_actions(entity, record);
    info!(entity, rules = rules.len(), fired = triggered.len(), "rules evaluated");

    if json {
        let summary = EvaluationSummary {
            entity,
            rules_checked: rules.len(),
            triggered,
        };
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} of {} rule(s) fired for {}",
        triggered.len(),
        rules.len(),
        entity
    )?;
    for fired in &triggered {
        let parameters = serde_json::to_string(&fired.action.parameters)?;
        writeln!(
            out,
            "  - {} -> {} {}",
            fired.rule, fired.action.action_type, parameters
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn score_args(status: &str, risk: Vec<Risk>, json: bool) -> ScoreArgs {
        ScoreArgs {
            status: status.to_string(),
            risks: None,
            risk,
            strict: false,
            as_of: Some(as_of()),
            json,
        }
    }

    #[test]
    fn text_report_lists_score_and_factors() {
        let mut out = Vec::new();
        run_score(
            score_args("at-risk", vec![Risk::new("high", 0.5)], false),
            &ScoringConfig::default(),
            &mut out,
        )
        .expect("score renders");

        let text = String::from_utf8(out).expect("utf8 output");
        assert!(text.contains("Project health as of 2026-10-19"));
        assert!(text.contains("- Score: 47 (critical)"));
        assert!(text.contains("risk #1 high @ 0.50"));
        assert!(!text.contains("- Note:"));
    }

    #[test]
    fn text_report_notes_neutral_fallbacks() {
        let mut out = Vec::new();
        run_score(
            score_args("paused", vec![Risk::new("severe", 0.2)], false),
            &ScoringConfig::default(),
            &mut out,
        )
        .expect("score renders");

        let text = String::from_utf8(out).expect("utf8 output");
        assert!(text.contains("- Score: 98 (on track)"));
        assert!(text.contains("- Note: unrecognized categories were scored with the neutral factor"));
    }

    #[test]
    fn json_report_flattens_assessment() {
        let mut out = Vec::new();
        run_score(
            score_args("paused", Vec::new(), true),
            &ScoringConfig::default(),
            &mut out,
        )
        .expect("score renders");

        let value: Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["status"], json!("paused"));
        assert_eq!(value["score"], json!(100));
        assert_eq!(value["rating"], json!("on_track"));
        assert_eq!(value["components"][0]["fallback"], json!(true));
    }

    #[test]
    fn strict_flag_rejects_percent_probability() {
        let mut args = score_args("active", vec![Risk::new("medium", 35.0)], false);
        args.strict = true;
        let err = run_score(args, &ScoringConfig::default(), &mut Vec::new())
            .expect_err("strict scoring rejects 35");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn evaluation_lists_fired_actions() {
        let definitions: Vec<RuleDefinition> = serde_json::from_value(json!([{
            "name": "Escalate",
            "ruleType": "automation",
            "condition": { "field": "status", "operator": "equals", "value": "delayed" },
            "action": { "type": "set_status", "parameters": { "status": "at-risk" } },
            "targetEntity": "project"
        }]))
        .expect("definitions deserialize");
        let rules = RuleSet::from_definitions(definitions).expect("rules register");
        let record: Record =
            serde_json::from_value(json!({ "status": "delayed" })).expect("record deserializes");

        let mut out = Vec::new();
        write_evaluation(&rules, "project", &record, false, &mut out).expect("renders");
        let text = String::from_utf8(out).expect("utf8 output");
        assert!(text.starts_with("1 of 1 rule(s) fired for project"));
        assert!(text.contains("Escalate -> set_status {\"status\":\"at-risk\"}"));
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "portfolio-health-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).expect("temp file written");
        path
    }

    const RULES_JSON: &str = r#"[{
        "name": "Escalate",
        "ruleType": "automation",
        "condition": { "field": "healthScore", "operator": "less_than", "value": 60 },
        "action": { "type": "set_status", "parameters": { "status": "at-risk" } },
        "targetEntity": "project"
    }]"#;

    #[test]
    fn evaluate_reads_record_and_rules_from_files() {
        let record = temp_file("record-ok.json", r#"{ "healthScore": 41 }"#);
        let rules = temp_file("rules-ok.json", RULES_JSON);

        let mut out = Vec::new();
        let args = EvaluateArgs {
            record: record.clone(),
            rules: rules.clone(),
            entity: "project".to_string(),
            json: true,
        };
        let result = run_evaluate(args, &mut out);
        std::fs::remove_file(&record).ok();
        std::fs::remove_file(&rules).ok();

        result.expect("evaluation succeeds");
        let value: Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["rules_checked"], json!(1));
        assert_eq!(value["triggered"][0]["rule"], json!("Escalate"));
    }

    #[test]
    fn evaluate_reports_missing_file_and_bad_json() {
        let rules = temp_file("rules-err.json", RULES_JSON);
        let missing = std::env::temp_dir().join(format!(
            "portfolio-health-{}-does-not-exist.json",
            std::process::id()
        ));
        let malformed = temp_file("record-bad.json", "{ \"healthScore\": ");
        let not_object = temp_file("record-array.json", "[1, 2]");

        let run = |record: &PathBuf| {
            run_evaluate(
                EvaluateArgs {
                    record: record.clone(),
                    rules: rules.clone(),
                    entity: "project".to_string(),
                    json: false,
                },
                &mut Vec::new(),
            )
        };
        let missing_err = run(&missing);
        let malformed_err = run(&malformed);
        let not_object_err = run(&not_object);
        for path in [&rules, &malformed, &not_object] {
            std::fs::remove_file(path).ok();
        }

        assert!(matches!(missing_err, Err(AppError::Io(_))));
        assert!(matches!(malformed_err, Err(AppError::Json(_))));
        assert!(matches!(not_object_err, Err(AppError::Json(_))));
    }
}
