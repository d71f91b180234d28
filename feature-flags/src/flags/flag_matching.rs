use std::collections::BTreeMap;
use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use tracing::instrument;

use crate::errors::FlagError;
use crate::flags::flag_match_reason::FeatureFlagMatchReason;
use crate::flags::flag_models::{FlagDefinition, FlagValue};
use crate::flags::flag_registry::FlagRegistry;
use crate::metrics::consts::{FLAG_EVALUATION_COUNTER, FLAG_EVALUATION_ERROR_COUNTER};
use crate::properties::property_matching::{match_condition, FlagMatchingError};
use crate::properties::property_models::EvaluationContext;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFlagMatch {
    pub value: FlagValue,
    pub reason: FeatureFlagMatchReason,
    pub condition_index: Option<usize>,
}

/// Result of evaluating every registered flag for one context. Flags are
/// keyed by id and serialize in sorted id order, independent of registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagsEvaluation {
    pub feature_flags: BTreeMap<String, FlagValue>,
    pub error_while_computing_flags: bool,
}

/// Resolves a single flag against a context.
///
/// Archived flags are pinned to their default and their conditions are never
/// looked at. Otherwise conditions are tried in declared order and the first
/// one that matches decides the value; if none match, the default applies.
pub fn match_flag(
    flag: &FlagDefinition,
    context: &EvaluationContext,
) -> Result<FeatureFlagMatch, FlagError> {
    if flag.archived {
        return Ok(FeatureFlagMatch {
            value: flag.default_value.clone(),
            reason: FeatureFlagMatchReason::FlagArchived,
            condition_index: None,
        });
    }

    for (index, condition) in flag.conditions.iter().enumerate() {
        let is_match = match_condition(condition, context).map_err(|e| match e {
            FlagMatchingError::UnsupportedOperator(_) => FlagError::UnsupportedOperator {
                flag_id: flag.id.clone(),
                condition_index: index,
            },
        })?;

        if is_match {
            return Ok(FeatureFlagMatch {
                value: condition.result.clone(),
                reason: FeatureFlagMatchReason::ConditionMatch,
                condition_index: Some(index),
            });
        }
    }

    Ok(FeatureFlagMatch {
        value: flag.default_value.clone(),
        reason: FeatureFlagMatchReason::NoConditionMatch,
        condition_index: None,
    })
}

/// Evaluates flags from a registry that was loaded once at startup.
/// Evaluation is a pure read of the registry; nothing here mutates it.
#[derive(Debug, Clone)]
pub struct FlagEvaluator {
    registry: Arc<FlagRegistry>,
}

impl FlagEvaluator {
    pub fn new(registry: Arc<FlagRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    #[instrument(skip(self, context))]
    pub fn get_match(
        &self,
        flag_id: &str,
        context: &EvaluationContext,
    ) -> Result<FeatureFlagMatch, FlagError> {
        let result = self
            .registry
            .get(flag_id)
            .ok_or_else(|| FlagError::NotFound(flag_id.to_string()))
            .and_then(|flag| match_flag(flag, context));

        match &result {
            Ok(flag_match) => {
                tracing::debug!(
                    reason = %flag_match.reason,
                    condition_index = ?flag_match.condition_index,
                    value = %flag_match.value,
                    "evaluated flag"
                );
                counter!(FLAG_EVALUATION_COUNTER, "reason" => flag_match.reason.as_str())
                    .increment(1);
            }
            Err(e) => {
                counter!(FLAG_EVALUATION_ERROR_COUNTER, "error" => e.error_code()).increment(1);
            }
        }

        result
    }

    /// Strict evaluation: an unknown flag id is an error.
    pub fn evaluate(
        &self,
        flag_id: &str,
        context: &EvaluationContext,
    ) -> Result<FlagValue, FlagError> {
        self.get_match(flag_id, context).map(|m| m.value)
    }

    /// Lenient evaluation for view code: any failure resolves to `fallback`.
    pub fn evaluate_or(
        &self,
        flag_id: &str,
        context: &EvaluationContext,
        fallback: FlagValue,
    ) -> FlagValue {
        match self.evaluate(flag_id, context) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("falling back to {} for flag {}: {}", fallback, flag_id, e);
                fallback
            }
        }
    }

    /// Evaluates every registered flag, archived ones included. A flag that
    /// fails to evaluate resolves to its default and marks the whole result.
    /// The output map is keyed by flag id and iterates in id order.
    pub fn evaluate_all(&self, context: &EvaluationContext) -> FlagsEvaluation {
        let mut feature_flags = BTreeMap::new();
        let mut error_while_computing_flags = false;

        for flag in self.registry.iter() {
            let value = match self.get_match(&flag.id, context) {
                Ok(flag_match) => flag_match.value,
                Err(e) => {
                    tracing::error!("error evaluating flag {}: {}", flag.id, e);
                    error_while_computing_flags = true;
                    flag.default_value.clone()
                }
            };
            feature_flags.insert(flag.id.clone(), value);
        }

        FlagsEvaluation {
            feature_flags,
            error_while_computing_flags,
        }
    }
}
