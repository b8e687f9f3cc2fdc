use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Video / audio quality verdict for a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Quality {
    #[default]
    #[serde(rename = "Baik")]
    Baik,
    #[serde(rename = "Tidak Baik")]
    TidakBaik,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Baik => "Baik",
            Quality::TidakBaik => "Tidak Baik",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Baik" => Some(Quality::Baik),
            "Tidak Baik" => Some(Quality::TidakBaik),
            _ => None,
        }
    }
}

/// One shift report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastReport {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub program: String,
    pub video_quality: Quality,
    pub audio_quality: Quality,
    /// One or two names, in the order they were picked
    pub staff: Vec<String>,
    pub issue: Option<String>,
    pub remediation: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BroadcastReport {
    /// ISO `YYYY-MM-DD`, the form used for date/month filtering.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `08:00-09:00`
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            format_wall_clock(self.start_time),
            format_wall_clock(self.end_time)
        )
    }
}

/// A validated report ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReport {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub program: String,
    pub video_quality: Quality,
    pub audio_quality: Quality,
    pub staff: Vec<String>,
    pub issue: Option<String>,
    pub remediation: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
}

/// `HH:MM`, or `HH:MM:SS` when seconds were given.
pub fn format_wall_clock(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

pub fn parse_wall_clock(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_string(&Quality::TidakBaik).unwrap(),
            "\"Tidak Baik\""
        );
        let q: Quality = serde_json::from_str("\"Baik\"").unwrap();
        assert_eq!(q, Quality::Baik);
        assert!(serde_json::from_str::<Quality>("\"Sedang\"").is_err());
    }

    #[test]
    fn wall_clock_keeps_submitted_precision() {
        let t = parse_wall_clock("08:00").unwrap();
        assert_eq!(format_wall_clock(t), "08:00");
        let t = parse_wall_clock("23:59:30").unwrap();
        assert_eq!(format_wall_clock(t), "23:59:30");
        assert!(parse_wall_clock("8 pagi").is_none());
        assert!(parse_wall_clock("25:00").is_none());
    }
}
