use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::BroadcastReport;

/// Number of reports shown in the dashboard's "recent" list.
pub const RECENT_LIMIT: usize = 5;

/// Dashboard figures over the full report set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    /// Distinct calendar days (UTC) on which reports were filed
    pub reported_days: usize,
    pub latest_created_at: Option<DateTime<Utc>>,
}

impl ReportStats {
    pub fn compute(reports: &[BroadcastReport]) -> Self {
        let reported_days = reports
            .iter()
            .map(|r| r.created_at.date_naive())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: reports.len(),
            reported_days,
            latest_created_at: reports.iter().map(|r| r.created_at).max(),
        }
    }
}
