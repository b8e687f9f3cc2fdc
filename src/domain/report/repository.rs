use async_trait::async_trait;

use super::{BroadcastReport, NewReport};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReportRepositoryInterface: Send + Sync {
    /// All reports ordered by creation time, newest first.
    async fn list_reports(&self) -> DomainResult<Vec<BroadcastReport>>;
    async fn get_report(&self, id: &str) -> DomainResult<Option<BroadcastReport>>;
    async fn create_report(&self, report: NewReport) -> DomainResult<BroadcastReport>;
    /// Returns `None` when no report has this id.
    async fn update_report(&self, id: &str, report: NewReport)
        -> DomainResult<Option<BroadcastReport>>;
    async fn delete_report(&self, id: &str) -> DomainResult<()>;
}
