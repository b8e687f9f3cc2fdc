use async_trait::async_trait;

use super::{NewSession, Session};
use crate::domain::DomainResult;

#[async_trait]
pub trait SessionRepositoryInterface: Send + Sync {
    async fn create_session(&self, session: NewSession) -> DomainResult<Session>;
    async fn get_session(&self, id: &str) -> DomainResult<Option<Session>>;
    async fn get_session_by_refresh_hash(&self, hash: &str) -> DomainResult<Option<Session>>;
    /// Idempotent: revoking an already revoked session is not an error.
    async fn revoke_session(&self, id: &str) -> DomainResult<()>;
}
