use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum FeatureFlagMatchReason {
    #[strum(serialize = "condition_match")]
    ConditionMatch,
    #[strum(serialize = "no_condition_match")]
    NoConditionMatch,
    #[strum(serialize = "flag_archived")]
    FlagArchived,
}

impl FeatureFlagMatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureFlagMatchReason::ConditionMatch => "condition_match",
            FeatureFlagMatchReason::NoConditionMatch => "no_condition_match",
            FeatureFlagMatchReason::FlagArchived => "flag_archived",
        }
    }
}

impl std::fmt::Display for FeatureFlagMatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            FeatureFlagMatchReason::ConditionMatch.to_string(),
            "condition_match"
        );
        assert_eq!(
            FeatureFlagMatchReason::NoConditionMatch.to_string(),
            "no_condition_match"
        );
        assert_eq!(
            FeatureFlagMatchReason::FlagArchived.to_string(),
            "flag_archived"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            FeatureFlagMatchReason::from_str("flag_archived").unwrap(),
            FeatureFlagMatchReason::FlagArchived
        );
        assert!(FeatureFlagMatchReason::from_str("out_of_rollout_bound").is_err());
    }
}
