//! Report DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::report::model::format_wall_clock;
use crate::domain::{BroadcastReport, DomainResult, Quality, ReportDraft, ReportFilter};

/// Report API representation. Dates are `YYYY-MM-DD`, times `HH:MM`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub program: String,
    pub video_quality: Quality,
    pub audio_quality: Quality,
    pub staff: Vec<String>,
    pub issue: Option<String>,
    pub remediation: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BroadcastReport> for ReportDto {
    fn from(r: BroadcastReport) -> Self {
        Self {
            date: r.date_string(),
            start_time: format_wall_clock(r.start_time),
            end_time: format_wall_clock(r.end_time),
            id: r.id,
            program: r.program,
            video_quality: r.video_quality,
            audio_quality: r.audio_quality,
            staff: r.staff,
            issue: r.issue,
            remediation: r.remediation,
            notes: r.notes,
            created_by: r.created_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Report form submission, used for both create and edit
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub video_quality: Quality,
    #[serde(default)]
    pub audio_quality: Quality,
    /// One or two technical directors on duty
    #[serde(default)]
    pub staff: Vec<String>,
    pub issue: Option<String>,
    pub remediation: Option<String>,
    pub notes: Option<String>,
}

impl From<ReportRequest> for ReportDraft {
    fn from(r: ReportRequest) -> Self {
        Self {
            date: r.date,
            start_time: r.start_time,
            end_time: r.end_time,
            program: r.program,
            video_quality: r.video_quality,
            audio_quality: r.audio_quality,
            staff: r.staff,
            issue: r.issue,
            remediation: r.remediation,
            notes: r.notes,
        }
    }
}

/// Listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Case-insensitive match on program or issue
    pub search: Option<String>,
    /// Exact date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Month, `YYYY-MM`
    pub month: Option<String>,
}

impl ReportQuery {
    /// Validate the raw filter values; malformed dates are a 400.
    pub fn to_filter(&self) -> DomainResult<ReportFilter> {
        ReportFilter::from_raw(
            self.search.as_deref(),
            self.date.as_deref(),
            self.month.as_deref(),
        )
    }
}

/// Filtered reports plus what the caller may do with them
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportListDto {
    pub items: Vec<ReportDto>,
    pub total: usize,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffRosterDto {
    pub staff: Vec<String>,
    pub max_per_report: usize,
}
