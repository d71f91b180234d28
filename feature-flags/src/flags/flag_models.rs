use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    Equals,
    Includes,
    NotEquals,
    // Anything we don't know how to evaluate lands here, so that a newer
    // definitions file fails loudly at registration instead of at parse time.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    Onboarding,
    Billing,
    Dashboard,
    Marketing,
    Experiment,
    Other,
}

/// The resolved value of a flag. Flags are booleans, strings or numbers;
/// on the wire they are plain JSON scalars. Numbers keep the integer/float
/// distinction they were configured with, so `5` is echoed back as `5`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FlagValue::Boolean(b) => Value::Bool(*b),
            FlagValue::Number(n) => Value::Number(n.clone()),
            FlagValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Boolean(b) => write!(f, "{}", b),
            FlagValue::Number(n) => write!(f, "{}", n),
            FlagValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Boolean(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Number(value.into())
    }
}

impl From<serde_json::Number> for FlagValue {
    fn from(value: serde_json::Number) -> Self {
        FlagValue::Number(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::String(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::String(value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub cookie_field: String,
    pub operator: OperatorType,
    pub value: Value,
    pub result: FlagValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptive_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: FlagCategory,
    pub default_value: FlagValue,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl FlagDefinition {
    /// Index of the first condition whose operator can't be evaluated, if any.
    pub fn first_unsupported_condition(&self) -> Option<usize> {
        self.conditions
            .iter()
            .position(|c| c.operator == OperatorType::Unsupported)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FeatureFlagList {
    pub flags: Vec<FlagDefinition>,
}
