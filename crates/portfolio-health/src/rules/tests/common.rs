use serde_json::{json, Map, Value};

use crate::rules::domain::{ConditionDefinition, Record, RuleAction, RuleDefinition};

pub(super) fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("record fixture must be a JSON object, got {other}"),
    }
}

pub(super) fn project_record() -> Record {
    record(json!({
        "name": "Benefits Modernisation",
        "status": "active",
        "budget": 1250000,
        "healthScore": 58,
        "startDate": "2026-01-12",
        "tags": ["digital", "citizen-facing"],
        "owner": { "department": "Work and Pensions", "grade": 7 },
        "sponsor": null
    }))
}

pub(super) fn definition(name: &str, field: &str, operator: &str, value: Value) -> RuleDefinition {
    let mut parameters = Map::new();
    parameters.insert("status".to_string(), json!("at-risk"));

    RuleDefinition {
        name: name.to_string(),
        description: format!("{name} fixture"),
        rule_type: "automation".to_string(),
        condition: ConditionDefinition {
            field: field.to_string(),
            operator: operator.to_string(),
            value,
        },
        action: RuleAction {
            action_type: "set_status".to_string(),
            parameters,
        },
        target_entity: "project".to_string(),
    }
}
