use serde_json::Value;

use crate::flags::flag_models::{Condition, OperatorType};
use crate::properties::property_models::EvaluationContext;

#[derive(Debug, PartialEq, Eq)]
pub enum FlagMatchingError {
    UnsupportedOperator(OperatorType),
}

/// Value equality as seen by `equals`/`not_equals`. Numbers compare by value
/// so that `1` and `1.0` are the same thing, at any depth; everything else is
/// structural.
pub fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => l == r,
        },
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, l)| r.get(key).is_some_and(|r| values_equal(l, r)))
        }
        _ => lhs == rhs,
    }
}

/// Substring check for strings, membership check for arrays. Any other pairing
/// of types is never a match.
pub fn value_includes(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), needle) => items.iter().any(|item| values_equal(item, needle)),
        _ => false,
    }
}

pub fn match_condition(
    condition: &Condition,
    context: &EvaluationContext,
) -> Result<bool, FlagMatchingError> {
    let match_value = context.get(&condition.cookie_field);

    match condition.operator {
        OperatorType::Equals => {
            Ok(match_value.is_some_and(|value| values_equal(value, &condition.value)))
        }
        OperatorType::NotEquals => {
            // A missing field is not equal to anything
            Ok(!match_value.is_some_and(|value| values_equal(value, &condition.value)))
        }
        OperatorType::Includes => {
            Ok(match_value.is_some_and(|value| value_includes(value, &condition.value)))
        }
        OperatorType::Unsupported => Err(FlagMatchingError::UnsupportedOperator(
            condition.operator,
        )),
    }
}
