use crate::infra::parse_date;
use crate::report::{build_report, render_report, write_evaluation};
use chrono::{Local, NaiveDate};
use clap::Args;
use portfolio_health::error::AppError;
use portfolio_health::rules::{Record, RuleDefinition, RuleSet};
use portfolio_health::scoring::{ProjectStatus, Risk};
use serde_json::{json, Value};
use std::io::Write;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the assessment date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

struct SampleProject {
    name: &'static str,
    status: ProjectStatus,
    risks: Vec<Risk>,
}

fn sample_portfolio() -> Vec<SampleProject> {
    vec![
        SampleProject {
            name: "Benefits Modernisation",
            status: ProjectStatus::Active,
            risks: vec![Risk::new("medium", 0.4), Risk::new("low", 0.2)],
        },
        SampleProject {
            name: "Border Systems Upgrade",
            status: ProjectStatus::AtRisk,
            risks: vec![Risk::new("high", 0.5)],
        },
        SampleProject {
            name: "Estates Consolidation",
            status: ProjectStatus::Delayed,
            risks: vec![Risk::new("critical", 0.7), Risk::new("high", 0.3)],
        },
        SampleProject {
            name: "Records Digitisation",
            status: ProjectStatus::from_label("on-hold"),
            risks: Vec::new(),
        },
    ]
}

fn sample_rules() -> Result<RuleSet, AppError> {
    let definitions: Vec<RuleDefinition> = serde_json::from_value(json!([
        {
            "name": "Escalate unhealthy projects",
            "description": "Projects scoring below 60 are flagged at risk",
            "ruleType": "health_threshold",
            "condition": { "field": "healthScore", "operator": "less_than", "value": 60 },
            "action": { "type": "set_status", "parameters": { "status": "at-risk" } },
            "targetEntity": "project"
        },
        {
            "name": "Brief delivery board on delays",
            "description": "Delayed projects go to the next board pack",
            "ruleType": "notification",
            "condition": { "field": "status", "operator": "equals", "value": "delayed" },
            "action": { "type": "notify", "parameters": { "audience": "delivery-board" } },
            "targetEntity": "project"
        }
    ]))?;
    Ok(RuleSet::from_definitions(definitions)?)
}

fn project_record(name: &str, status: &ProjectStatus, score: u8) -> Record {
    let mut record = Record::new();
    record.insert("name".to_string(), Value::from(name));
    record.insert("status".to_string(), Value::from(status.label()));
    record.insert("healthScore".to_string(), Value::from(score));
    record
}

pub(crate) fn run_demo<W: Write>(args: DemoArgs, out: &mut W) -> Result<(), AppError> {
    let assessed_on = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let rules = sample_rules()?;

    writeln!(out, "Portfolio health demo")?;
    for project in sample_portfolio() {
        writeln!(out, "\n{}", project.name)?;
        let report = build_report(project.status.clone(), &project.risks, assessed_on);
        render_report(&report, out)?;

        let record = project_record(project.name, &project.status, report.assessment.score);
        write_evaluation(&rules, "project", &record, false, out)?;
    }

    Ok(())
}
