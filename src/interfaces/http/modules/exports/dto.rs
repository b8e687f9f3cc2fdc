use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{DomainResult, ReportFilter};

/// Same filters as the listing, plus an optional period label.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    pub search: Option<String>,
    /// Exact date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Month, `YYYY-MM`
    pub month: Option<String>,
    /// Printed period text; derived from `date`/`month` when omitted
    pub period: Option<String>,
}

impl ExportQuery {
    pub fn to_filter(&self) -> DomainResult<ReportFilter> {
        ReportFilter::from_raw(
            self.search.as_deref(),
            self.date.as_deref(),
            self.month.as_deref(),
        )
    }
}
