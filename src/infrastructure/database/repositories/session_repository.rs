use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::db_err;
use crate::domain::{DomainResult, NewSession, Session, SessionRepositoryInterface};
use crate::infrastructure::database::entities::session;

pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn session_model_to_domain(model: session::Model) -> Session {
    Session {
        id: model.id,
        account_id: model.account_id,
        refresh_token_hash: model.refresh_token_hash,
        created_at: model.created_at,
        expires_at: model.expires_at,
        revoked_at: model.revoked_at,
    }
}

#[async_trait]
impl SessionRepositoryInterface for SessionRepository {
    async fn create_session(&self, new: NewSession) -> DomainResult<Session> {
        let model = session::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            account_id: Set(new.account_id),
            refresh_token_hash: Set(new.refresh_token_hash),
            created_at: Set(Utc::now()),
            expires_at: Set(new.expires_at),
            revoked_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(session_model_to_domain(model))
    }

    async fn get_session(&self, id: &str) -> DomainResult<Option<Session>> {
        let model = session::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(session_model_to_domain))
    }

    async fn get_session_by_refresh_hash(&self, hash: &str) -> DomainResult<Option<Session>> {
        let model = session::Entity::find()
            .filter(session::Column::RefreshTokenHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(session_model_to_domain))
    }

    async fn revoke_session(&self, id: &str) -> DomainResult<()> {
        let existing = session::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(());
        };
        if existing.revoked_at.is_some() {
            return Ok(());
        }

        let mut active: session::ActiveModel = existing.into();
        active.revoked_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::test_utils::{seed_user, test_db};
    use chrono::Duration;

    #[tokio::test]
    async fn create_lookup_and_revoke() {
        let db = test_db().await;
        let user = seed_user(&db, "alan", UserRole::Operator).await;
        let repo = SessionRepository::new(db);

        let session = repo
            .create_session(NewSession {
                account_id: user.id.clone(),
                refresh_token_hash: "hash-1".into(),
                expires_at: Utc::now() + Duration::days(1),
            })
            .await
            .unwrap();
        assert!(session.is_active(Utc::now()));

        let by_hash = repo.get_session_by_refresh_hash("hash-1").await.unwrap().unwrap();
        assert_eq!(by_hash.id, session.id);

        repo.revoke_session(&session.id).await.unwrap();
        repo.revoke_session(&session.id).await.unwrap();
        let revoked = repo.get_session(&session.id).await.unwrap().unwrap();
        assert!(!revoked.is_active(Utc::now()));
    }

    #[tokio::test]
    async fn revoking_unknown_session_is_a_no_op() {
        let repo = SessionRepository::new(test_db().await);
        repo.revoke_session("missing").await.unwrap();
    }
}
