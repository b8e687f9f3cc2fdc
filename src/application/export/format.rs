//! Indonesian (id-ID) date labels and the row projection shared by both
//! export formats.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::{BroadcastReport, ReportMonth};

pub const EMPTY_ISSUE: &str = "Siaran lancar";
pub const EMPTY_TEXT: &str = "-";

pub const COLUMN_COUNT: usize = 10;

const WEEKDAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];
const MONTHS_LONG: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

/// `Rabu, 1 Mei 2024`
pub fn format_report_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS_SHORT[month_index(date.month())],
        date.year()
    )
}

/// `16 Oktober 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_LONG[month_index(date.month())],
        date.year()
    )
}

/// `Mei 2024`
pub fn format_month(month: ReportMonth) -> String {
    format!("{} {}", MONTHS_LONG[month_index(month.month)], month.year)
}

/// Stored text, or `fallback` when absent or blank.
pub fn or_placeholder(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// One report projected to display strings, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub no: usize,
    pub date: String,
    pub staff: String,
    pub video: String,
    pub audio: String,
    pub time_range: String,
    pub program: String,
    pub issue: String,
    pub remediation: String,
    pub notes: String,
}

impl ExportRow {
    /// `no` is 1-based.
    pub fn project(no: usize, report: &BroadcastReport) -> Self {
        let staff = report.staff.join("/");
        Self {
            no,
            date: format_report_date(report.date),
            staff: or_placeholder(Some(&staff), EMPTY_TEXT),
            video: report.video_quality.as_str().to_string(),
            audio: report.audio_quality.as_str().to_string(),
            time_range: report.time_range(),
            program: or_placeholder(Some(&report.program), EMPTY_TEXT),
            issue: or_placeholder(report.issue.as_deref(), EMPTY_ISSUE),
            remediation: or_placeholder(report.remediation.as_deref(), EMPTY_TEXT),
            notes: or_placeholder(report.notes.as_deref(), EMPTY_TEXT),
        }
    }

    pub fn cells(&self) -> [String; COLUMN_COUNT] {
        [
            self.no.to_string(),
            self.date.clone(),
            self.staff.clone(),
            self.video.clone(),
            self.audio.clone(),
            self.time_range.clone(),
            self.program.clone(),
            self.issue.clone(),
            self.remediation.clone(),
            self.notes.clone(),
        ]
    }
}

pub fn project_rows(reports: &[BroadcastReport]) -> Vec<ExportRow> {
    reports
        .iter()
        .enumerate()
        .map(|(i, r)| ExportRow::project(i + 1, r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quality;
    use crate::test_utils::report_fixture;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn report_dates_use_indonesian_names() {
        assert_eq!(format_report_date(ymd(2024, 5, 1)), "Rabu, 1 Mei 2024");
        assert_eq!(format_report_date(ymd(2024, 8, 17)), "Sabtu, 17 Agu 2024");
        assert_eq!(format_report_date(ymd(2024, 12, 29)), "Minggu, 29 Des 2024");
    }

    #[test]
    fn long_and_month_labels() {
        assert_eq!(format_long_date(ymd(2026, 10, 16)), "16 Oktober 2026");
        assert_eq!(
            format_month(ReportMonth { year: 2024, month: 2 }),
            "Februari 2024"
        );
    }

    #[test]
    fn empty_fields_get_placeholders() {
        let mut report = report_fixture("r1", "2024-05-01", "Berita Pagi", Some("  "));
        report.notes = Some(String::new());
        report.audio_quality = Quality::TidakBaik;
        report.staff = vec!["Hafiz".into(), "Alan".into()];

        let row = ExportRow::project(3, &report);
        assert_eq!(row.no, 3);
        assert_eq!(row.date, "Rabu, 1 Mei 2024");
        assert_eq!(row.staff, "Hafiz/Alan");
        assert_eq!(row.audio, "Tidak Baik");
        assert_eq!(row.time_range, "08:00-09:00");
        assert_eq!(row.issue, EMPTY_ISSUE);
        assert_eq!(row.remediation, EMPTY_TEXT);
        assert_eq!(row.notes, EMPTY_TEXT);
    }

    #[test]
    fn stored_text_is_kept_verbatim() {
        let mut report = report_fixture("r1", "2024-05-01", "Berita", Some("  Audio putus\n"));
        report.remediation = Some(" Ganti kabel ".into());
        let row = ExportRow::project(1, &report);
        assert_eq!(row.issue, "  Audio putus\n");
        assert_eq!(row.remediation, " Ganti kabel ");
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let reports = vec![
            report_fixture("a", "2024-05-01", "A", None),
            report_fixture("b", "2024-05-02", "B", None),
        ];
        let rows = project_rows(&reports);
        assert_eq!(rows.iter().map(|r| r.no).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rows[1].cells()[6], "B");
    }
}
