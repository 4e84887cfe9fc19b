//! YAML schema types for monitored tables.
//!
//! - `TableConfig`: one monitored table (name template, shard policy, thresholds)
//! - `TableFile`: the `tables:` list a definition file holds
//! - `DateForShards`: shard-date policy with a fail-open fallback arm
//! - `TimeThreshold` / `DurationThreshold`: the two independent freshness rules

mod shards;
mod table;
mod threshold;

pub use shards::*;
pub use table::*;
pub use threshold::*;
