use std::collections::{HashMap, HashSet};

use metrics::counter;

use crate::errors::FlagError;
use crate::flags::flag_models::{FlagCategory, FlagDefinition};
use crate::metrics::consts::{
    REGISTRY_DEFINITIONS_LOADED_COUNTER, REGISTRY_REJECTED_BATCH_COUNTER,
};

/// Criteria for [`FlagRegistry::list`]. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagFilter {
    pub category: Option<FlagCategory>,
    pub archived: Option<bool>,
    pub search: Option<String>,
}

impl FlagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: FlagCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, flag: &FlagDefinition) -> bool {
        if self.category.is_some_and(|category| category != flag.category) {
            return false;
        }
        if self.archived.is_some_and(|archived| archived != flag.archived) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    Some(flag.id.as_str()),
                    flag.descriptive_id.as_deref(),
                    Some(flag.name.as_str()),
                    Some(flag.description.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }
}

/// In-memory store of flag definitions, unique by id and kept in registration
/// order. Built once at startup and then shared read-only (usually behind an
/// `Arc`) with everything that evaluates flags.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: Vec<FlagDefinition>,
    index: HashMap<String, usize>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = FlagDefinition>,
    ) -> Result<Self, FlagError> {
        let mut registry = Self::new();
        registry.register(definitions)?;
        Ok(registry)
    }

    /// Adds a batch of definitions. The batch is all-or-nothing: a duplicate id
    /// (against the registry or within the batch) or a condition with an
    /// unsupported operator rejects every definition in it.
    pub fn register(
        &mut self,
        definitions: impl IntoIterator<Item = FlagDefinition>,
    ) -> Result<usize, FlagError> {
        let batch: Vec<FlagDefinition> = definitions.into_iter().collect();

        if let Err(e) = self.validate_batch(&batch) {
            tracing::error!("rejected flag definitions batch: {}", e);
            counter!(REGISTRY_REJECTED_BATCH_COUNTER, "reason" => e.error_code()).increment(1);
            return Err(e);
        }

        let added = batch.len();
        for flag in batch {
            self.index.insert(flag.id.clone(), self.flags.len());
            self.flags.push(flag);
        }

        tracing::info!(added, total = self.flags.len(), "registered flag definitions");
        counter!(REGISTRY_DEFINITIONS_LOADED_COUNTER).increment(added as u64);

        Ok(added)
    }

    fn validate_batch(&self, batch: &[FlagDefinition]) -> Result<(), FlagError> {
        let mut seen = HashSet::with_capacity(batch.len());
        for flag in batch {
            if self.index.contains_key(&flag.id) || !seen.insert(flag.id.as_str()) {
                return Err(FlagError::DuplicateId(flag.id.clone()));
            }
            if let Some(condition_index) = flag.first_unsupported_condition() {
                return Err(FlagError::UnsupportedOperator {
                    flag_id: flag.id.clone(),
                    condition_index,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&FlagDefinition> {
        self.index.get(id).map(|&position| &self.flags[position])
    }

    pub fn get_by_serial(&self, serial: u32) -> Option<&FlagDefinition> {
        self.flags.iter().find(|flag| flag.serial == Some(serial))
    }

    pub fn get_by_descriptive_id(&self, descriptive_id: &str) -> Option<&FlagDefinition> {
        self.flags
            .iter()
            .find(|flag| flag.descriptive_id.as_deref() == Some(descriptive_id))
    }

    pub fn list(&self, filter: Option<&FlagFilter>) -> Vec<&FlagDefinition> {
        self.flags
            .iter()
            .filter(|flag| filter.map_or(true, |filter| filter.matches(flag)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagDefinition> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::flags::flag_models::{Condition, FlagValue, OperatorType};
    use crate::utils::test_utils::create_test_flag;

    #[test]
    fn test_register_and_get() {
        let mut registry = FlagRegistry::new();
        let added = registry
            .register(vec![
                create_test_flag("flag_a", FlagValue::Boolean(false), vec![]),
                create_test_flag("flag_b", FlagValue::from("control"), vec![]),
            ])
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("flag_b").unwrap().default_value,
            FlagValue::from("control")
        );
        assert!(registry.get("flag_c").is_none());
    }

    #[test]
    fn test_duplicate_against_existing_rejects_whole_batch() {
        let mut registry =
            FlagRegistry::from_definitions(vec![create_test_flag("flag_a", false.into(), vec![])])
                .unwrap();

        let result = registry.register(vec![
            create_test_flag("flag_b", false.into(), vec![]),
            create_test_flag("flag_a", true.into(), vec![]),
        ]);

        match result {
            Err(FlagError::DuplicateId(id)) => assert_eq!(id, "flag_a"),
            other => panic!("Expected DuplicateId, got {:?}", other),
        }
        assert_eq!(registry.len(), 1);
        assert!(registry.get("flag_b").is_none());
        assert_eq!(
            registry.get("flag_a").unwrap().default_value,
            FlagValue::Boolean(false)
        );
    }

    #[test]
    fn test_duplicate_within_batch() {
        let result = FlagRegistry::from_definitions(vec![
            create_test_flag("flag_a", false.into(), vec![]),
            create_test_flag("flag_a", true.into(), vec![]),
        ]);

        assert!(matches!(result, Err(FlagError::DuplicateId(id)) if id == "flag_a"));
    }

    #[test]
    fn test_unsupported_operator_rejected_at_registration() {
        let flag = create_test_flag(
            "flag_regex",
            false.into(),
            vec![
                Condition {
                    cookie_field: "package".to_string(),
                    operator: OperatorType::Equals,
                    value: json!("paid"),
                    result: true.into(),
                },
                Condition {
                    cookie_field: "package".to_string(),
                    operator: OperatorType::Unsupported,
                    value: json!("^free"),
                    result: true.into(),
                },
            ],
        );

        match FlagRegistry::from_definitions(vec![flag]) {
            Err(FlagError::UnsupportedOperator {
                flag_id,
                condition_index,
            }) => {
                assert_eq!(flag_id, "flag_regex");
                assert_eq!(condition_index, 1);
            }
            other => panic!("Expected UnsupportedOperator, got {:?}", other),
        }
    }

    #[test]
    fn test_list_preserves_order_and_filters() {
        let mut billing = create_test_flag("1001_is_free_trial_user", false.into(), vec![]);
        billing.category = FlagCategory::Billing;
        billing.name = "Free trial user".to_string();
        let mut onboarding = create_test_flag("1000_onboarding_flow", "".into(), vec![]);
        onboarding.category = FlagCategory::Onboarding;
        onboarding.archived = true;
        let mut dashboard = create_test_flag("1002_new_dashboard", false.into(), vec![]);
        dashboard.category = FlagCategory::Dashboard;
        dashboard.description = "Shows the redesigned TRIAL banner".to_string();

        let registry = FlagRegistry::from_definitions(vec![billing, onboarding, dashboard]).unwrap();

        let ids = |flags: Vec<&FlagDefinition>| {
            flags
                .into_iter()
                .map(|f| f.id.clone())
                .collect::<Vec<String>>()
        };

        assert_eq!(
            ids(registry.list(None)),
            vec![
                "1001_is_free_trial_user",
                "1000_onboarding_flow",
                "1002_new_dashboard"
            ]
        );
        assert_eq!(
            ids(registry.list(Some(&FlagFilter::new().archived(false)))),
            vec!["1001_is_free_trial_user", "1002_new_dashboard"]
        );
        assert_eq!(
            ids(registry.list(Some(&FlagFilter::new().category(FlagCategory::Onboarding)))),
            vec!["1000_onboarding_flow"]
        );
        assert_eq!(
            ids(registry.list(Some(&FlagFilter::new().search("trial")))),
            vec!["1001_is_free_trial_user", "1002_new_dashboard"]
        );
        assert_eq!(
            ids(registry.list(Some(
                &FlagFilter::new()
                    .search("trial")
                    .category(FlagCategory::Billing)
            ))),
            vec!["1001_is_free_trial_user"]
        );
        assert_eq!(
            ids(registry.list(Some(&FlagFilter::new().search("   ")))).len(),
            3
        );
    }

    #[test]
    fn test_lookup_by_serial_and_descriptive_id() {
        let mut flag = create_test_flag("1001_is_free_trial_user", false.into(), vec![]);
        flag.serial = Some(1001);
        flag.descriptive_id = Some("is_free_trial_user".to_string());
        let registry = FlagRegistry::from_definitions(vec![flag]).unwrap();

        assert_eq!(
            registry.get_by_serial(1001).map(|f| f.id.as_str()),
            Some("1001_is_free_trial_user")
        );
        assert_eq!(
            registry
                .get_by_descriptive_id("is_free_trial_user")
                .map(|f| f.id.as_str()),
            Some("1001_is_free_trial_user")
        );
        assert!(registry.get_by_serial(7).is_none());
    }
}
