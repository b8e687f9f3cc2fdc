use chrono::NaiveDate;

use super::format::{format_long_date, format_month, format_report_date};
use crate::config::ExportConfig;
use crate::domain::{ReportFilter, User};

pub const SIGNATURE_PLACEHOLDER: &str = "________________";
pub const REPORT_TITLE: &str = "LAPORAN TD PENYIARAN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Message shown to the user when generation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "Terjadi kesalahan saat membuat Excel. Pastikan data valid.",
            ExportFormat::Pdf => "Terjadi kesalahan saat membuat PDF. Pastikan data valid.",
        }
    }
}

/// Someone who signs the printed report. Unknown values print as a
/// blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signatory {
    pub name: Option<String>,
    pub nip: Option<String>,
}

impl Signatory {
    pub fn new(name: Option<&str>, nip: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from);
        Self {
            name: clean(name),
            nip: clean(nip),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(SIGNATURE_PLACEHOLDER)
    }

    pub fn display_nip(&self) -> &str {
        self.nip.as_deref().unwrap_or(SIGNATURE_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub title: String,
    pub station_name: String,
    pub period: Option<String>,
    pub printed_on: NaiveDate,
    /// The exporting user ("Petugas TD")
    pub operator: Signatory,
    /// Approving authority ("Ketua")
    pub supervisor: Signatory,
    pub filename_prefix: String,
}

impl ExportOptions {
    pub fn new(
        config: &ExportConfig,
        operator: &User,
        filter: &ReportFilter,
        printed_on: NaiveDate,
    ) -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            station_name: config.station_name.clone(),
            period: period_label(filter),
            printed_on,
            operator: Signatory::new(Some(&operator.name), operator.nip.as_deref()),
            supervisor: Signatory::new(
                Some(&config.supervisor_name),
                Some(&config.supervisor_nip),
            ),
            filename_prefix: config.filename_prefix.clone(),
        }
    }

    /// Explicit period text wins over the one derived from the filter.
    pub fn with_period(mut self, period: Option<String>) -> Self {
        if let Some(period) = period.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
            self.period = Some(period);
        }
        self
    }

    /// `Dicetak pada: 16 Oktober 2026`
    pub fn printed_label(&self) -> String {
        format!("Dicetak pada: {}", format_long_date(self.printed_on))
    }

    /// `<prefix>-YYYY-MM-DD.<ext>`
    pub fn filename(&self, format: ExportFormat) -> String {
        format!(
            "{}-{}.{}",
            self.filename_prefix,
            self.printed_on.format("%Y-%m-%d"),
            format.extension()
        )
    }
}

/// Human-readable period derived from the date or month filter.
pub fn period_label(filter: &ReportFilter) -> Option<String> {
    if let Some(date) = filter.date {
        return Some(format!("Periode: {}", format_report_date(date)));
    }
    filter
        .month
        .map(|month| format!("Periode: {}", format_month(month)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn operator(nip: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: "u1".into(),
            name: "Alan Budiman".into(),
            username: "alan".into(),
            role: "operator".into(),
            nip: nip.map(String::from),
            position: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn printed() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn defaults_come_from_config_and_user() {
        let opts = ExportOptions::new(
            &ExportConfig::default(),
            &operator(None),
            &ReportFilter::default(),
            printed(),
        );
        assert_eq!(opts.station_name, "TVRI");
        assert_eq!(opts.supervisor.display_name(), "Dr. John Doe, M.Si.");
        assert_eq!(opts.supervisor.display_nip(), "19651231 199203 1 001");
        assert_eq!(opts.operator.display_name(), "Alan Budiman");
        assert_eq!(opts.operator.display_nip(), SIGNATURE_PLACEHOLDER);
        assert_eq!(opts.period, None);
        assert_eq!(opts.printed_label(), "Dicetak pada: 16 Oktober 2026");
    }

    #[test]
    fn filename_uses_prefix_and_print_date() {
        let opts = ExportOptions::new(
            &ExportConfig::default(),
            &operator(Some("1990")),
            &ReportFilter::default(),
            printed(),
        );
        assert_eq!(
            opts.filename(ExportFormat::Xlsx),
            "laporan-td-penyiaran-2026-10-16.xlsx"
        );
        assert_eq!(
            opts.filename(ExportFormat::Pdf),
            "laporan-td-penyiaran-2026-10-16.pdf"
        );
    }

    #[test]
    fn period_follows_filter_unless_overridden() {
        let filter = ReportFilter::from_raw(None, None, Some("2024-05")).unwrap();
        let opts = ExportOptions::new(&ExportConfig::default(), &operator(None), &filter, printed());
        assert_eq!(opts.period.as_deref(), Some("Periode: Mei 2024"));

        let opts = opts.with_period(Some("Triwulan II".into()));
        assert_eq!(opts.period.as_deref(), Some("Triwulan II"));

        let filter = ReportFilter::from_raw(None, Some("2024-05-01"), None).unwrap();
        assert_eq!(
            period_label(&filter).as_deref(),
            Some("Periode: Rabu, 1 Mei 2024")
        );
    }

    #[test]
    fn blank_signatory_values_fall_back() {
        let s = Signatory::new(Some("  "), Some(""));
        assert_eq!(s.display_name(), SIGNATURE_PLACEHOLDER);
        assert_eq!(s.display_nip(), SIGNATURE_PLACEHOLDER);
    }
}
