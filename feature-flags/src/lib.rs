pub mod config;
pub mod errors;
pub mod flags;
pub mod metrics;
pub mod properties;

// Test helpers are shared with the integration tests under tests/, so they
// can't live behind #[cfg(test)].
pub mod utils;
