use serde_json::{Number, Value};
use std::cmp::Ordering;

use super::domain::{Condition, ConditionOperator, Record};

/// Check `condition` against `record`.
///
/// A missing field never matches, whatever the operator. Comparisons between
/// values of different JSON types are non-matches rather than errors.
pub fn evaluate(record: &Record, condition: &Condition) -> bool {
    let Some(actual) = lookup_field(record, &condition.field) else {
        return false;
    };
    let expected = &condition.value;

    match condition.operator {
        ConditionOperator::Equals => values_equal(actual, expected),
        ConditionOperator::NotEquals => !values_equal(actual, expected),
        ConditionOperator::GreaterThan => compare(actual, expected) == Some(Ordering::Greater),
        ConditionOperator::LessThan => compare(actual, expected) == Some(Ordering::Less),
        ConditionOperator::Contains => contains(actual, expected),
    }
}

/// Exact key first, then a dotted path through nested objects.
pub(crate) fn lookup_field<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(field) {
        return Some(value);
    }
    if !field.contains('.') {
        return None;
    }

    let mut segments = field.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(left), Value::Number(right)) => {
            compare_numbers(left, right) == Some(Ordering::Equal)
        }
        _ => actual == expected,
    }
}

/// Integers compare exactly; `f64` is only used when either side is a float.
fn compare_numbers(left: &Number, right: &Number) -> Option<Ordering> {
    if left.is_f64() || right.is_f64() {
        return left.as_f64()?.partial_cmp(&right.as_f64()?);
    }
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return Some(left.cmp(&right));
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return Some(left.cmp(&right));
    }
    // One side is negative, the other above i64::MAX.
    if left.is_i64() {
        Some(Ordering::Less)
    } else {
        Some(Ordering::Greater)
    }
}

fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(left), Value::Number(right)) => compare_numbers(left, right),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), _) => items.iter().any(|item| values_equal(item, expected)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn dotted_paths_walk_nested_objects() {
        let record = record(json!({ "owner": { "department": "Treasury" } }));
        assert_eq!(
            lookup_field(&record, "owner.department"),
            Some(&json!("Treasury"))
        );
        assert_eq!(lookup_field(&record, "owner.missing"), None);
        assert_eq!(lookup_field(&record, "owner.department.name"), None);
    }

    #[test]
    fn literal_dotted_key_wins_over_path() {
        let record = record(json!({ "a.b": 1, "a": { "b": 2 } }));
        assert_eq!(lookup_field(&record, "a.b"), Some(&json!(1)));
    }

    #[test]
    fn numbers_compare_by_value_across_representations() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!("1")));
    }

    #[test]
    fn large_integers_compare_exactly() {
        assert!(!values_equal(
            &json!(9_007_199_254_740_993_u64),
            &json!(9_007_199_254_740_992_u64)
        ));
        assert_eq!(
            compare(&json!(u64::MAX), &json!(u64::MAX - 1)),
            Some(Ordering::Greater)
        );
        assert_eq!(compare(&json!(-1), &json!(u64::MAX)), Some(Ordering::Less));
        assert_eq!(compare(&json!(u64::MAX), &json!(-1)), Some(Ordering::Greater));
        assert_eq!(compare(&json!(2), &json!(2.5)), Some(Ordering::Less));
    }
}
