pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod listeners;
pub mod metrics_consts;
