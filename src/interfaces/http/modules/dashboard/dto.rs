use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::reports::Dashboard;
use crate::interfaces::http::modules::reports::ReportDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardDto {
    pub total_reports: usize,
    /// Distinct days on which at least one report was filed
    pub reported_days: usize,
    pub latest_report_at: Option<DateTime<Utc>>,
    pub recent: Vec<ReportDto>,
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            total_reports: d.stats.total,
            reported_days: d.stats.reported_days,
            latest_report_at: d.stats.latest_created_at,
            recent: d.recent.into_iter().map(ReportDto::from).collect(),
        }
    }
}
