use serde_json::json;

use crate::flags::flag_models::{
    Condition, FlagCategory, FlagDefinition, FlagValue, OperatorType,
};

pub fn create_test_flag(
    id: &str,
    default_value: FlagValue,
    conditions: Vec<Condition>,
) -> FlagDefinition {
    FlagDefinition {
        id: id.to_string(),
        serial: None,
        descriptive_id: None,
        name: id.to_string(),
        description: String::new(),
        category: FlagCategory::Other,
        default_value,
        archived: false,
        archived_date: None,
        created_date: None,
        conditions,
    }
}

pub fn free_trial_flag() -> FlagDefinition {
    let mut flag = create_test_flag(
        "1001_is_free_trial_user",
        FlagValue::Boolean(false),
        vec![Condition {
            cookie_field: "package".to_string(),
            operator: OperatorType::Equals,
            value: json!("free_trial"),
            result: FlagValue::Boolean(true),
        }],
    );
    flag.serial = Some(1001);
    flag.category = FlagCategory::Billing;
    flag
}

/// Archived, but with a condition that would match a free-trial owner.
pub fn onboarding_flag() -> FlagDefinition {
    let mut flag = create_test_flag(
        "1000_onboarding_flow_personalized",
        FlagValue::from(""),
        vec![Condition {
            cookie_field: "user_role".to_string(),
            operator: OperatorType::Equals,
            value: json!("owner"),
            result: FlagValue::from("personalized"),
        }],
    );
    flag.serial = Some(1000);
    flag.category = FlagCategory::Onboarding;
    flag.archived = true;
    flag
}
