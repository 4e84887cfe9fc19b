//! Check pipeline: resolve the table ID, look up its last modification, evaluate.
//!
//! The [`MetadataSource`] trait is the seam to warehouse backends. The crate
//! ships [`SnapshotSource`], which reads a JSON map of timestamps.

mod report;
mod source;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tracing::{debug, warn};

use crate::evaluator::evaluate;
use crate::resolver::resolve_table_id;
use crate::schema::TableConfig;

pub use report::{CheckReport, CheckStatus};
pub use source::{MetadataSource, SnapshotSource};

/// Runs freshness checks against a [`MetadataSource`].
pub struct Checker {
    source: Arc<dyn MetadataSource>,
}

impl Checker {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    /// Check one table as of `now`.
    ///
    /// A missing table or a source failure is reported in the returned
    /// [`CheckStatus`] rather than as an error.
    pub async fn check<Tz: TimeZone>(&self, tc: &TableConfig, now: &DateTime<Tz>) -> CheckReport {
        let table_id = tc.qualify(&resolve_table_id(tc, now));
        let template = tc.template_id();

        let last_modified = match self.source.last_modified(&table_id).await {
            Ok(Some(ts)) => ts,
            Ok(None) => {
                warn!(table = %table_id, source = self.source.source_name(), "table not found");
                return CheckReport {
                    template,
                    table_id,
                    last_modified: None,
                    status: CheckStatus::Missing,
                };
            }
            Err(e) => {
                warn!(table = %table_id, source = self.source.source_name(), error = %e, "metadata lookup failed");
                return CheckReport {
                    template,
                    table_id,
                    last_modified: None,
                    status: CheckStatus::Error {
                        message: e.to_string(),
                    },
                };
            }
        };

        let evaluation = evaluate(tc, now, &last_modified);
        let status = if evaluation.is_old() {
            CheckStatus::Stale {
                reasons: evaluation.reasons(),
            }
        } else {
            CheckStatus::Fresh
        };
        debug!(table = %table_id, last_modified = %last_modified, status = status.label(), "checked table");

        CheckReport {
            template,
            table_id,
            last_modified: Some(last_modified),
            status,
        }
    }

    /// Check every table in order.
    pub async fn check_all<Tz: TimeZone>(
        &self,
        tables: &[TableConfig],
        now: &DateTime<Tz>,
    ) -> Vec<CheckReport> {
        let mut reports = Vec::with_capacity(tables.len());
        for tc in tables {
            reports.push(self.check(tc, now).await);
        }
        reports
    }
}
