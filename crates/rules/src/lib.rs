//! Freshness checks for scheduled, date-sharded tables.
//!
//! This crate provides:
//! - YAML table definitions with serde deserialization
//! - Table ID resolution for date-sharded tables (`TODAY`, `ONE_DAY_AGO`, ...)
//! - Staleness evaluation against time-of-day and maximum-age thresholds
//! - A filesystem loader for definition files
//! - A check pipeline over a pluggable metadata source

pub mod checker;
pub mod duration;
pub mod evaluator;
pub mod loader;
pub mod resolver;
pub mod schema;

pub use evaluator::{evaluate, is_old, Evaluation, Violation};
pub use resolver::resolve_table_id;
pub use schema::{DateForShards, DurationThreshold, TableConfig, TimeThreshold};
