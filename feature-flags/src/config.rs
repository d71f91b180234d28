use std::ops::Deref;
use std::path::PathBuf;
use std::str::FromStr;

use envconfig::Envconfig;

use crate::errors::FlagError;
use crate::properties::property_models::EvaluationContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexBool(pub bool);

impl FromStr for FlexBool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(FlexBool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(FlexBool(false)),
            _ => Err(format!("Invalid boolean value: {}", s)),
        }
    }
}

impl From<FlexBool> for bool {
    fn from(flex: FlexBool) -> Self {
        flex.0
    }
}

impl Deref for FlexBool {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(default = "feature-flags/config/feature_flags.json")]
    pub flag_definitions_path: PathBuf,

    // JSON object with the session facts conditions are matched against
    #[envconfig(default = "{}")]
    pub evaluation_context: String,

    #[envconfig(default = "false")]
    pub debug: FlexBool,
}

impl Config {
    pub fn default_test_config() -> Self {
        Self {
            flag_definitions_path: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/config/feature_flags.json"
            )),
            evaluation_context: "{}".to_string(),
            debug: FlexBool(false),
        }
    }

    pub fn parse_evaluation_context(&self) -> Result<EvaluationContext, FlagError> {
        Ok(serde_json::from_str(&self.evaluation_context)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::init_from_hashmap(&HashMap::new()).unwrap();

        assert_eq!(
            config.flag_definitions_path,
            PathBuf::from("feature-flags/config/feature_flags.json")
        );
        assert_eq!(config.evaluation_context, "{}");
        assert!(!*config.debug);
        assert!(config.parse_evaluation_context().unwrap().is_empty());
    }

    #[test]
    fn test_config_from_values() {
        let mut env = HashMap::new();
        env.insert(
            "FLAG_DEFINITIONS_PATH".to_string(),
            "/etc/flags.json".to_string(),
        );
        env.insert(
            "EVALUATION_CONTEXT".to_string(),
            r#"{"package": "free_trial"}"#.to_string(),
        );
        env.insert("DEBUG".to_string(), "yes".to_string());

        let config = Config::init_from_hashmap(&env).unwrap();

        assert_eq!(config.flag_definitions_path, PathBuf::from("/etc/flags.json"));
        assert!(*config.debug);
        assert_eq!(
            config.parse_evaluation_context().unwrap().get("package"),
            Some(&json!("free_trial"))
        );
    }

    #[test]
    fn test_invalid_evaluation_context() {
        let mut config = Config::default_test_config();
        config.evaluation_context = r#"["not", "an", "object"]"#.to_string();

        match config.parse_evaluation_context() {
            Err(FlagError::DataParsingError(_)) => (),
            other => panic!("Expected DataParsingError, got {:?}", other),
        }
    }

    #[test]
    fn test_flex_bool() {
        assert_eq!("On".parse::<FlexBool>(), Ok(FlexBool(true)));
        assert_eq!("0".parse::<FlexBool>(), Ok(FlexBool(false)));
        assert!("maybe".parse::<FlexBool>().is_err());
    }
}
