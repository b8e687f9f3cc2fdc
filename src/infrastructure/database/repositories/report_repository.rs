use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::db_err;
use crate::domain::{
    BroadcastReport, DomainError, DomainResult, NewReport, Quality, ReportRepositoryInterface,
};
use crate::infrastructure::database::entities::broadcast_report;

pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn quality_to_domain(q: broadcast_report::Quality) -> Quality {
    match q {
        broadcast_report::Quality::Baik => Quality::Baik,
        broadcast_report::Quality::TidakBaik => Quality::TidakBaik,
    }
}

fn quality_to_entity(q: Quality) -> broadcast_report::Quality {
    match q {
        Quality::Baik => broadcast_report::Quality::Baik,
        Quality::TidakBaik => broadcast_report::Quality::TidakBaik,
    }
}

fn encode_staff(staff: &[String]) -> DomainResult<String> {
    serde_json::to_string(staff)
        .map_err(|e| DomainError::Storage(format!("Failed to encode staff: {}", e)))
}

fn report_model_to_domain(model: broadcast_report::Model) -> DomainResult<BroadcastReport> {
    let staff: Vec<String> = serde_json::from_str(&model.staff).map_err(|e| {
        DomainError::Storage(format!("Corrupt staff list on report {}: {}", model.id, e))
    })?;

    Ok(BroadcastReport {
        id: model.id,
        date: model.date,
        start_time: model.start_time,
        end_time: model.end_time,
        program: model.program,
        video_quality: quality_to_domain(model.video_quality),
        audio_quality: quality_to_domain(model.audio_quality),
        staff,
        issue: model.issue,
        remediation: model.remediation,
        notes: model.notes,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Copies every editable field onto `active`.
fn apply_fields(active: &mut broadcast_report::ActiveModel, report: NewReport) -> DomainResult<()> {
    active.staff = Set(encode_staff(&report.staff)?);
    active.date = Set(report.date);
    active.start_time = Set(report.start_time);
    active.end_time = Set(report.end_time);
    active.program = Set(report.program);
    active.video_quality = Set(quality_to_entity(report.video_quality));
    active.audio_quality = Set(quality_to_entity(report.audio_quality));
    active.issue = Set(report.issue);
    active.remediation = Set(report.remediation);
    active.notes = Set(report.notes);
    active.created_by = Set(report.created_by);
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ReportRepositoryInterface for ReportRepository {
    async fn list_reports(&self) -> DomainResult<Vec<BroadcastReport>> {
        let models = broadcast_report::Entity::find()
            .order_by_desc(broadcast_report::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(report_model_to_domain).collect()
    }

    async fn get_report(&self, id: &str) -> DomainResult<Option<BroadcastReport>> {
        let model = broadcast_report::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(report_model_to_domain).transpose()
    }

    async fn create_report(&self, report: NewReport) -> DomainResult<BroadcastReport> {
        let now = Utc::now();
        let mut active = broadcast_report::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_fields(&mut active, report)?;

        let model = active.insert(&self.db).await.map_err(db_err)?;
        report_model_to_domain(model)
    }

    async fn update_report(
        &self,
        id: &str,
        report: NewReport,
    ) -> DomainResult<Option<BroadcastReport>> {
        let existing = broadcast_report::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: broadcast_report::ActiveModel = existing.into();
        apply_fields(&mut active, report)?;
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        report_model_to_domain(updated).map(Some)
    }

    async fn delete_report(&self, id: &str) -> DomainResult<()> {
        let result = broadcast_report::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("BroadcastReport", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{new_report, test_db};

    #[tokio::test]
    async fn create_then_get_reproduces_every_field() {
        let repo = ReportRepository::new(test_db().await);
        let mut input = new_report("2024-05-01", "Berita Pagi");
        input.staff = vec!["Hafiz".into(), "Alan".into()];
        input.audio_quality = Quality::TidakBaik;
        input.issue = Some("Audio putus".into());
        input.notes = Some(String::new());

        let created = repo.create_report(input.clone()).await.unwrap();
        let fetched = repo.get_report(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.staff, input.staff);
        assert_eq!(fetched.start_time, input.start_time);
        assert_eq!(fetched.audio_quality, Quality::TidakBaik);
        assert_eq!(fetched.issue, input.issue);
        assert_eq!(fetched.notes.as_deref(), Some(""));
        assert_eq!(fetched.remediation, None);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = ReportRepository::new(test_db().await);
        repo.create_report(new_report("2024-05-01", "Pertama")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create_report(new_report("2024-04-01", "Kedua")).await.unwrap();

        let list = repo.list_reports().await.unwrap();
        let programs: Vec<_> = list.iter().map(|r| r.program.as_str()).collect();
        assert_eq!(programs, vec!["Kedua", "Pertama"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_unknown_id_is_none() {
        let repo = ReportRepository::new(test_db().await);
        let created = repo.create_report(new_report("2024-05-01", "Lama")).await.unwrap();

        let mut edit = new_report("2024-05-02", "Baru");
        edit.created_by = "editor".into();
        let updated = repo.update_report(&created.id, edit).await.unwrap().unwrap();
        assert_eq!(updated.program, "Baru");
        assert_eq!(updated.created_by, "editor");
        assert_eq!(updated.created_at, created.created_at);

        assert!(repo
            .update_report("missing", new_report("2024-05-02", "X"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = ReportRepository::new(test_db().await);
        let created = repo.create_report(new_report("2024-05-01", "Hapus")).await.unwrap();
        repo.delete_report(&created.id).await.unwrap();
        assert!(repo.get_report(&created.id).await.unwrap().is_none());
        assert!(repo.delete_report(&created.id).await.is_err());
    }
}
