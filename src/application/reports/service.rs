//! Report use-cases: form submission, edit, listing and the dashboard.

use std::sync::Arc;

use tracing::info;

use crate::domain::report::stats::RECENT_LIMIT;
use crate::domain::{
    BroadcastReport, DomainError, DomainResult, ReportDraft, ReportFilter,
    ReportRepositoryInterface, ReportStats,
};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: ReportStats,
    pub recent: Vec<BroadcastReport>,
}

pub struct ReportService<R: ReportRepositoryInterface> {
    repo: Arc<R>,
    staff_roster: Vec<String>,
}

impl<R: ReportRepositoryInterface> ReportService<R> {
    pub fn new(repo: Arc<R>, staff_roster: Vec<String>) -> Self {
        Self { repo, staff_roster }
    }

    pub fn staff_roster(&self) -> &[String] {
        &self.staff_roster
    }

    /// Validate and store a new report. Nothing is written when the draft
    /// is invalid.
    pub async fn submit(&self, draft: ReportDraft, account_id: &str) -> DomainResult<BroadcastReport> {
        let new_report = draft.validate(&self.staff_roster, account_id)?;
        let report = self.repo.create_report(new_report).await?;

        metrics::counter!("reports_created_total").increment(1);
        info!(report_id = %report.id, date = %report.date_string(), created_by = account_id, "Report created");
        Ok(report)
    }

    /// Replace every field of an existing report; `created_by` becomes the
    /// editing account.
    pub async fn update(
        &self,
        id: &str,
        draft: ReportDraft,
        account_id: &str,
    ) -> DomainResult<BroadcastReport> {
        let new_report = draft.validate(&self.staff_roster, account_id)?;
        let report = self
            .repo
            .update_report(id, new_report)
            .await?
            .ok_or_else(|| DomainError::not_found("BroadcastReport", id))?;

        info!(report_id = id, updated_by = account_id, "Report updated");
        Ok(report)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.repo.delete_report(id).await?;
        info!(report_id = id, "Report deleted");
        Ok(())
    }

    pub async fn get(&self, id: &str) -> DomainResult<BroadcastReport> {
        self.repo
            .get_report(id)
            .await?
            .ok_or_else(|| DomainError::not_found("BroadcastReport", id))
    }

    /// Newest first, after applying `filter`.
    pub async fn list(&self, filter: &ReportFilter) -> DomainResult<Vec<BroadcastReport>> {
        let reports = self.repo.list_reports().await?;
        Ok(filter.apply(reports))
    }

    pub async fn dashboard(&self) -> DomainResult<Dashboard> {
        let reports = self.repo.list_reports().await?;
        let stats = ReportStats::compute(&reports);
        let recent = reports.into_iter().take(RECENT_LIMIT).collect();
        Ok(Dashboard { stats, recent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::draft::MSG_STAFF_COUNT;
    use crate::domain::Quality;
    use crate::infrastructure::database::repositories::ReportRepository;
    use crate::test_utils::test_db;

    async fn service() -> ReportService<ReportRepository> {
        let roster = ["Bagus", "Alan", "Hafiz"].iter().map(|s| s.to_string()).collect();
        ReportService::new(Arc::new(ReportRepository::new(test_db().await)), roster)
    }

    fn draft(program: &str) -> ReportDraft {
        ReportDraft {
            date: "2024-05-01".into(),
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            program: program.into(),
            video_quality: Quality::Baik,
            audio_quality: Quality::TidakBaik,
            staff: vec!["Alan".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn submitted_report_is_first_in_listing() {
        let svc = service().await;
        svc.submit(draft("Dialog"), "acc-1").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let created = svc.submit(draft("Berita Pagi"), "acc-1").await.unwrap();

        let list = svc.list(&ReportFilter::default()).await.unwrap();
        assert_eq!(list[0].id, created.id);
        assert_eq!(list[0].program, "Berita Pagi");
        assert_eq!(list[0].audio_quality, Quality::TidakBaik);
        assert_eq!(list[0].staff, vec!["Alan".to_string()]);
        assert_eq!(list[0].time_range(), "08:00-09:00");
        assert_eq!(list[0].created_by, "acc-1");
    }

    #[tokio::test]
    async fn invalid_staff_count_writes_nothing() {
        let svc = service().await;
        let mut d = draft("Berita");
        d.staff = vec!["Bagus".into(), "Alan".into(), "Hafiz".into()];

        let err = svc.submit(d, "acc-1").await.unwrap_err();
        assert_eq!(err.to_string(), MSG_STAFF_COUNT);
        assert!(svc.list(&ReportFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_report_is_not_found() {
        let svc = service().await;
        let err = svc.update("missing", draft("X"), "acc-1").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_records_editor() {
        let svc = service().await;
        let created = svc.submit(draft("Lama"), "acc-1").await.unwrap();
        let updated = svc.update(&created.id, draft("Baru"), "acc-2").await.unwrap();
        assert_eq!(updated.program, "Baru");
        assert_eq!(updated.created_by, "acc-2");
    }

    #[tokio::test]
    async fn dashboard_caps_recent_list() {
        let svc = service().await;
        for i in 0..7 {
            svc.submit(draft(&format!("Program {}", i)), "acc-1").await.unwrap();
        }
        let dash = svc.dashboard().await.unwrap();
        assert_eq!(dash.stats.total, 7);
        assert_eq!(dash.recent.len(), RECENT_LIMIT);
        assert_eq!(dash.stats.reported_days, 1);
    }
}
