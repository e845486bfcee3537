//! Declarative rules gated by single-field conditions.
//!
//! Definitions are compiled when registered, so an unsupported operator is a
//! configuration error reported once. Evaluating a compiled condition against
//! a record never fails: missing fields and mismatched types simply do not match.

mod condition;
pub mod domain;
mod registry;

#[cfg(test)]
mod tests;

pub use condition::evaluate;
pub use domain::{
    Condition, ConditionDefinition, ConditionOperator, Record, Rule, RuleAction, RuleDefinition,
    TriggeredAction, UnknownOperator,
};
pub use registry::{compile, RuleError, RuleSet};
