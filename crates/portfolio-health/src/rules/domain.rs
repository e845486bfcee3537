use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Field/value view of a dashboard entity (project, portfolio, standard...).
pub type Record = Map<String, Value>;

/// Closed set of comparison operators a condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
}

impl ConditionOperator {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Equals,
            Self::NotEquals,
            Self::GreaterThan,
            Self::LessThan,
            Self::Contains,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Contains => "contains",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when an operator label is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported condition operator '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for ConditionOperator {
    type Err = UnknownOperator;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|operator| operator.label() == normalized)
            .ok_or_else(|| UnknownOperator(value.to_string()))
    }
}

/// Single field predicate with a validated operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, ConditionOperator::Equals, value.into())
    }
}

/// Condition as authored, before the operator has been checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

/// Action a rule requests once its condition holds. Execution belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// Rule as stored by the rules-engine collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "rule_type")]
    pub rule_type: String,
    pub condition: ConditionDefinition,
    pub action: RuleAction,
    #[serde(alias = "target_entity")]
    pub target_entity: String,
}

/// Registered rule whose condition is known to be well formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub name: String,
    pub description: String,
    pub rule_type: String,
    pub condition: Condition,
    pub action: RuleAction,
    pub target_entity: String,
}

impl Rule {
    pub fn targets(&self, entity: &str) -> bool {
        self.target_entity.eq_ignore_ascii_case(entity.trim())
    }
}

/// Action selected for a record, tagged with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredAction {
    pub rule: String,
    pub action: RuleAction,
}
