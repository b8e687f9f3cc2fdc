//! In-memory report filtering: text search plus an exact-date or
//! month-prefix match.

use chrono::NaiveDate;

use super::BroadcastReport;
use crate::domain::{DomainError, DomainResult};

/// Calendar month in `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    pub year: i32,
    pub month: u32,
}

impl ReportMonth {
    pub fn parse(s: &str) -> DomainResult<Self> {
        let s = s.trim();
        let invalid = || DomainError::Validation(format!("Format bulan tidak valid: {}", s));
        if s.len() != 7 {
            return Err(invalid());
        }
        let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| invalid())?;
        Ok(Self {
            year: chrono::Datelike::year(&first),
            month: chrono::Datelike::month(&first),
        })
    }

    pub fn prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub month: Option<ReportMonth>,
}

impl ReportFilter {
    /// Build from raw query values; blank values mean "no filter".
    pub fn from_raw(
        search: Option<&str>,
        date: Option<&str>,
        month: Option<&str>,
    ) -> DomainResult<Self> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        let date = present(date)
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                    DomainError::Validation(format!("Format tanggal tidak valid: {}", d))
                })
            })
            .transpose()?;
        let month = present(month).map(ReportMonth::parse).transpose()?;

        Ok(Self {
            // Matched as typed; trimming only decides whether it is blank.
            search: search
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            date,
            month,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.date.is_none() && self.month.is_none()
    }

    pub fn matches(&self, report: &BroadcastReport) -> bool {
        self.matches_search(report) && self.matches_date(report)
    }

    fn matches_search(&self, report: &BroadcastReport) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();
        report.program.to_lowercase().contains(&term)
            || report
                .issue
                .as_ref()
                .is_some_and(|issue| issue.to_lowercase().contains(&term))
    }

    fn matches_date(&self, report: &BroadcastReport) -> bool {
        let iso = report.date_string();
        if let Some(date) = self.date {
            if iso != date.format("%Y-%m-%d").to_string() {
                return false;
            }
        }
        if let Some(month) = self.month {
            if !iso.starts_with(&month.prefix()) {
                return false;
            }
        }
        true
    }

    /// Keeps the input order.
    pub fn apply(&self, reports: Vec<BroadcastReport>) -> Vec<BroadcastReport> {
        reports.into_iter().filter(|r| self.matches(r)).collect()
    }
}
