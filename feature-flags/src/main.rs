use std::sync::Arc;

use anyhow::Context;
use envconfig::Envconfig;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use feature_flags::config::Config;
use feature_flags::flags::flag_matching::FlagEvaluator;
use feature_flags::flags::flag_models::FeatureFlagList;

fn init_tracing(debug: bool) {
    // stdout carries the evaluation result, so logs go to stderr
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let base_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let log_layer = if debug {
        base_layer.with_ansi(true).with_filter(env_filter()).boxed()
    } else {
        base_layer.json().with_filter(env_filter()).boxed()
    };

    tracing_subscriber::registry().with(log_layer).init();
}

fn main() -> anyhow::Result<()> {
    let config = Config::init_from_env().context("Invalid configuration")?;
    init_tracing(*config.debug);

    let registry = FeatureFlagList::from_file(&config.flag_definitions_path)
        .and_then(FeatureFlagList::into_registry)
        .with_context(|| {
            format!(
                "could not load flag definitions from {}",
                config.flag_definitions_path.display()
            )
        })?;
    tracing::info!(
        flags = registry.len(),
        path = %config.flag_definitions_path.display(),
        "loaded flag registry"
    );

    let context = config
        .parse_evaluation_context()
        .context("EVALUATION_CONTEXT must be a JSON object")?;

    let evaluator = FlagEvaluator::new(Arc::new(registry));
    let evaluation = evaluator.evaluate_all(&context);
    if evaluation.error_while_computing_flags {
        tracing::warn!("some flags fell back to their defaults");
    }

    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}
