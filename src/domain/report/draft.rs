//! Report form draft and its validation.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::model::{parse_wall_clock, NewReport, Quality};
use crate::domain::{DomainError, DomainResult};

pub const MSG_STAFF_COUNT: &str = "Pilih minimal 1 dan maksimal 2 petugas";
pub const MSG_REQUIRED: &str = "Mohon lengkapi semua field yang wajib diisi";

pub const MAX_STAFF: usize = 2;

/// Raw form input. Fields are kept as strings so that presence can be
/// checked before format, in the order the form reports errors.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
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
}

impl ReportDraft {
    /// Validate and turn the draft into a row owned by `created_by`.
    ///
    /// Order: staff count, required fields, formats, staff roster.
    /// An empty `roster` accepts any staff name.
    pub fn validate(self, roster: &[String], created_by: &str) -> DomainResult<NewReport> {
        if self.staff.is_empty() || self.staff.len() > MAX_STAFF {
            return Err(DomainError::Validation(MSG_STAFF_COUNT.into()));
        }

        let required = [&self.date, &self.start_time, &self.end_time, &self.program];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(DomainError::Validation(MSG_REQUIRED.into()));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            DomainError::Validation(format!("Format tanggal tidak valid: {}", self.date))
        })?;
        let start_time = parse_wall_clock(&self.start_time).ok_or_else(|| {
            DomainError::Validation(format!("Format jam mulai tidak valid: {}", self.start_time))
        })?;
        let end_time = parse_wall_clock(&self.end_time).ok_or_else(|| {
            DomainError::Validation(format!("Format jam selesai tidak valid: {}", self.end_time))
        })?;

        let mut seen = HashSet::new();
        for name in &self.staff {
            if name.trim().is_empty() {
                return Err(DomainError::Validation(MSG_STAFF_COUNT.into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(DomainError::Validation(format!("Petugas duplikat: {}", name)));
            }
            if !roster.is_empty() && !roster.iter().any(|r| r == name) {
                return Err(DomainError::Validation(format!("Petugas tidak dikenal: {}", name)));
            }
        }

        Ok(NewReport {
            date,
            start_time,
            end_time,
            program: self.program,
            video_quality: self.video_quality,
            audio_quality: self.audio_quality,
            staff: self.staff,
            issue: self.issue,
            remediation: self.remediation,
            notes: self.notes,
            created_by: created_by.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        ["Bagus", "Alan", "Hafiz"].iter().map(|s| s.to_string()).collect()
    }

    fn draft() -> ReportDraft {
        ReportDraft {
            date: "2024-05-01".into(),
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            program: "Berita Pagi".into(),
            video_quality: Quality::Baik,
            audio_quality: Quality::TidakBaik,
            staff: vec!["Alan".into()],
            ..Default::default()
        }
    }

    fn message(err: DomainError) -> String {
        match err {
            DomainError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_draft_keeps_every_field() {
        let mut d = draft();
        d.staff = vec!["Hafiz".into(), "Alan".into()];
        d.issue = Some("Audio putus".into());
        let report = d.validate(&roster(), "user-1").unwrap();

        assert_eq!(report.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(report.program, "Berita Pagi");
        assert_eq!(report.audio_quality, Quality::TidakBaik);
        assert_eq!(report.staff, vec!["Hafiz".to_string(), "Alan".to_string()]);
        assert_eq!(report.issue.as_deref(), Some("Audio putus"));
        assert_eq!(report.created_by, "user-1");
    }

    #[test]
    fn rejects_zero_or_three_staff() {
        let mut d = draft();
        d.staff.clear();
        assert_eq!(message(d.validate(&roster(), "u").unwrap_err()), MSG_STAFF_COUNT);

        let mut d = draft();
        d.staff = vec!["Bagus".into(), "Alan".into(), "Hafiz".into()];
        assert_eq!(message(d.validate(&roster(), "u").unwrap_err()), MSG_STAFF_COUNT);
    }

    #[test]
    fn staff_count_is_checked_before_required_fields() {
        let d = ReportDraft::default();
        assert_eq!(message(d.validate(&roster(), "u").unwrap_err()), MSG_STAFF_COUNT);
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut d = draft();
        d.program = "   ".into();
        assert_eq!(message(d.validate(&roster(), "u").unwrap_err()), MSG_REQUIRED);

        let mut d = draft();
        d.end_time.clear();
        assert_eq!(message(d.validate(&roster(), "u").unwrap_err()), MSG_REQUIRED);
    }

    #[test]
    fn malformed_date_and_time_are_rejected() {
        let mut d = draft();
        d.date = "01/05/2024".into();
        assert!(message(d.validate(&roster(), "u").unwrap_err()).contains("tanggal"));

        let mut d = draft();
        d.start_time = "jam delapan".into();
        assert!(message(d.validate(&roster(), "u").unwrap_err()).contains("jam mulai"));
    }

    #[test]
    fn unknown_or_duplicate_staff_is_rejected() {
        let mut d = draft();
        d.staff = vec!["Joko".into()];
        assert!(message(d.validate(&roster(), "u").unwrap_err()).contains("Joko"));

        let mut d = draft();
        d.staff = vec!["Alan".into(), "Alan".into()];
        assert!(message(d.validate(&roster(), "u").unwrap_err()).contains("duplikat"));
    }

    #[test]
    fn empty_roster_accepts_any_name() {
        let mut d = draft();
        d.staff = vec!["Joko".into()];
        assert!(d.validate(&[], "u").is_ok());
    }
}
