// src/lib.rs
pub mod types;
pub mod config;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod annualize;
pub mod portfolio;
pub mod providers;
pub mod strategy;
pub mod sizing;
pub mod report;
pub mod scanner;
