//! Filesystem loader for table definition files.
//!
//! Reads a single YAML file or scans a directory recursively for `*.yml` /
//! `*.yaml` files, each holding a `tables:` list, and collects the monitored
//! tables in load order.

mod core;
mod error;


pub use self::core::TableLoader;
pub use self::error::{LoadResult, LoadStatus, LoaderError, Result};
