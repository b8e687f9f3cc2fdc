use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::{conflict_or_db_err, db_err};
use crate::domain::{
    Account, CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::{auth_account, user};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        username: model.username,
        role: model.role,
        nip: model.nip,
        position: model.position,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn account_model_to_domain(model: auth_account::Model) -> Account {
    Account {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        // Dropping the transaction on an early return rolls it back, so a
        // failed profile insert never leaves an account behind.
        let txn = self.db.begin().await.map_err(db_err)?;

        auth_account::ActiveModel {
            id: Set(id.clone()),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_or_db_err(e, "Email sudah terdaftar"))?;

        let profile = user::ActiveModel {
            id: Set(id),
            name: Set(dto.name),
            username: Set(dto.username),
            role: Set(dto.role.as_str().to_string()),
            nip: Set(dto.nip),
            position: Set(dto.position),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_or_db_err(e, "Username sudah digunakan"))?;

        txn.commit().await.map_err(db_err)?;

        Ok(user_model_to_domain(profile))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = auth_account::Entity::find()
            .filter(auth_account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn get_account_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        let model = auth_account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::test_utils::{create_dto, test_db};

    #[tokio::test]
    async fn create_writes_account_and_profile() {
        let repo = UserRepository::new(test_db().await);
        let user = repo
            .create_user(create_dto("sari", "sari@tvri.local", UserRole::Operator))
            .await
            .unwrap();

        assert_eq!(user.role(), Some(UserRole::Operator));
        let account = repo.get_account_by_email("sari@tvri.local").await.unwrap().unwrap();
        assert_eq!(account.id, user.id);
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_rolls_back_the_account() {
        let repo = UserRepository::new(test_db().await);
        repo.create_user(create_dto("sari", "sari@tvri.local", UserRole::Operator))
            .await
            .unwrap();

        let err = repo
            .create_user(create_dto("sari", "other@tvri.local", UserRole::Operator))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(repo.get_account_by_email("other@tvri.local").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = UserRepository::new(test_db().await);
        repo.create_user(create_dto("sari", "sari@tvri.local", UserRole::Operator))
            .await
            .unwrap();
        let err = repo
            .create_user(create_dto("budi", "sari@tvri.local", UserRole::Operator))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_keeps_the_account() {
        let repo = UserRepository::new(test_db().await);
        let user = repo
            .create_user(create_dto("dedi", "dedi@tvri.local", UserRole::Admin))
            .await
            .unwrap();

        repo.delete_user(&user.id).await.unwrap();
        assert!(repo.get_user_by_id(&user.id).await.unwrap().is_none());
        assert!(repo.get_account_by_id(&user.id).await.unwrap().is_some());

        let err = repo.delete_user(&user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
