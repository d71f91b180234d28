use std::sync::Arc;

use feature_flags::config::Config;
use feature_flags::flags::flag_matching::FlagEvaluator;
use feature_flags::flags::flag_models::FeatureFlagList;
use once_cell::sync::Lazy;

pub static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default_test_config);

pub fn evaluator_for_config(config: &Config) -> FlagEvaluator {
    let registry = FeatureFlagList::from_file(&config.flag_definitions_path)
        .and_then(FeatureFlagList::into_registry)
        .expect("Failed to load flag definitions");
    FlagEvaluator::new(Arc::new(registry))
}
