use std::collections::HashSet;
use tracing::{debug, warn};

use super::condition::evaluate;
use super::domain::{
    Condition, ConditionDefinition, ConditionOperator, Record, Rule, RuleDefinition,
    TriggeredAction,
};

/// Configuration problems found while registering a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("rule name must not be empty")]
    MissingName,
    #[error("rule '{rule}' uses unsupported operator '{operator}'")]
    UnsupportedOperator { rule: String, operator: String },
    #[error("rule '{rule}' has a condition without a field")]
    MissingField { rule: String },
    #[error("rule '{0}' is already registered")]
    Duplicate(String),
}

/// Compile a definition into a rule, checking the operator against the closed set.
pub fn compile(definition: RuleDefinition) -> Result<Rule, RuleError> {
    let RuleDefinition {
        name,
        description,
        rule_type,
        condition,
        action,
        target_entity,
    } = definition;

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(RuleError::MissingName);
    }

    let ConditionDefinition {
        field,
        operator,
        value,
    } = condition;

    if field.trim().is_empty() {
        return Err(RuleError::MissingField { rule: name });
    }

    let operator = match operator.parse::<ConditionOperator>() {
        Ok(operator) => operator,
        Err(unknown) => {
            return Err(RuleError::UnsupportedOperator {
                rule: name,
                operator: unknown.0,
            })
        }
    };

    Ok(Rule {
        name,
        description,
        rule_type,
        condition: Condition {
            field,
            operator,
            value,
        },
        action,
        target_entity,
    })
}

/// In-memory set of registered rules, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    names: HashSet<String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from definitions, stopping at the first invalid rule.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = RuleDefinition>,
    {
        let mut set = Self::new();
        for definition in definitions {
            set.register(definition)?;
        }
        Ok(set)
    }

    pub fn register(&mut self, definition: RuleDefinition) -> Result<&Rule, RuleError> {
        let rule = compile(definition).inspect_err(|err| {
            warn!(error = %err, "rule rejected at registration");
        })?;

        if !self.names.insert(rule.name.clone()) {
            let err = RuleError::Duplicate(rule.name);
            warn!(error = %err, "rule rejected at registration");
            return Err(err);
        }

        debug!(
            rule = %rule.name,
            operator = %rule.condition.operator,
            target = %rule.target_entity,
            "rule registered"
        );
        self.rules.push(rule);
        Ok(&self.rules[self.rules.len() - 1])
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules of any target entity whose condition holds for `record`.
    pub fn matching<'a>(&'a self, record: &'a Record) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| evaluate(record, &rule.condition))
    }

    /// Actions requested for `record` by rules targeting `entity`. Nothing is executed.
    pub fn triggered_actions(&self, entity: &str, record: &Record) -> Vec<TriggeredAction> {
        self.matching(record)
            .filter(|rule| rule.targets(entity))
            .map(|rule| TriggeredAction {
                rule: rule.name.clone(),
                action: rule.action.clone(),
            })
            .collect()
    }
}
