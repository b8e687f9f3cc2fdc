//! User management service: admin CRUD, public sign-up and the
//! first-start admin account.

use std::sync::Arc;

use tracing::info;

use crate::config::AdminConfig;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::hash_password;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Admin-created user.
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub nip: Option<String>,
    pub position: Option<String>,
}

/// Self-service sign-up. Always yields an operator.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// A listed user plus whether the viewer may delete it.
#[derive(Debug, Clone)]
pub struct UserListing {
    pub user: User,
    pub can_delete: bool,
}

pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    allow_public_signup: bool,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, allow_public_signup: bool) -> Self {
        Self {
            repo,
            allow_public_signup,
        }
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create_user(&self, input: NewUserInput) -> DomainResult<User> {
        if input.name.trim().is_empty()
            || input.username.trim().is_empty()
            || input.email.trim().is_empty()
        {
            return Err(DomainError::Validation(
                "Mohon lengkapi semua field yang wajib diisi".into(),
            ));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password minimal {} karakter",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                name: input.name.trim().to_string(),
                username: input.username.trim().to_string(),
                email: input.email.trim().to_lowercase(),
                password_hash,
                role: input.role,
                nip: non_blank(input.nip),
                position: non_blank(input.position),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %input.role, "User created");
        Ok(user)
    }

    pub async fn signup(&self, input: SignupInput) -> DomainResult<User> {
        if !self.allow_public_signup {
            return Err(DomainError::Forbidden(
                "Pendaftaran akun dinonaktifkan".into(),
            ));
        }
        if input.password != input.confirm_password {
            return Err(DomainError::Validation("Password tidak cocok".into()));
        }

        self.create_user(NewUserInput {
            name: input.name,
            username: input.username,
            email: input.email,
            password: input.password,
            role: UserRole::Operator,
            nip: None,
            position: None,
        })
        .await
    }

    /// Refuses to delete the caller's own profile.
    pub async fn delete_user(&self, id: &str, current_account_id: &str) -> DomainResult<()> {
        if id == current_account_id {
            return Err(DomainError::Forbidden(
                "Tidak dapat menghapus akun sendiri".into(),
            ));
        }

        self.repo.delete_user(id).await?;
        info!(user_id = id, deleted_by = current_account_id, "User deleted");
        Ok(())
    }

    /// Create the configured admin when no profile exists yet.
    pub async fn ensure_default_admin(&self, admin: &AdminConfig) -> DomainResult<Option<User>> {
        if self.repo.count_users().await? > 0 {
            return Ok(None);
        }

        let user = self
            .create_user(NewUserInput {
                name: admin.name.clone(),
                username: admin.username.clone(),
                email: admin.email.clone(),
                password: admin.password.clone(),
                role: UserRole::Admin,
                nip: None,
                position: None,
            })
            .await?;
        Ok(Some(user))
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Newest first, filtered by a case-insensitive match on name,
    /// username or role.
    pub async fn list_users(
        &self,
        search: Option<&str>,
        current_account_id: &str,
    ) -> DomainResult<Vec<UserListing>> {
        let term = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let users = self.repo.list_users().await?;
        Ok(users
            .into_iter()
            .filter(|u| match &term {
                Some(term) => [&u.name, &u.username, &u.role]
                    .iter()
                    .any(|field| field.to_lowercase().contains(term)),
                None => true,
            })
            .map(|user| UserListing {
                can_delete: user.id != current_account_id,
                user,
            })
            .collect())
    }

    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::test_utils::{seed_user, test_db};

    async fn service(allow_signup: bool) -> UserService<UserRepository> {
        UserService::new(Arc::new(UserRepository::new(test_db().await)), allow_signup)
    }

    fn input(username: &str, role: UserRole) -> NewUserInput {
        NewUserInput {
            name: format!("{} Saputra", username),
            username: username.into(),
            email: format!("{}@tvri.local", username),
            password: "rahasia".into(),
            role,
            nip: Some("  ".into()),
            position: Some("Teknisi".into()),
        }
    }

    #[tokio::test]
    async fn create_user_normalizes_optional_fields() {
        let svc = service(false).await;
        let user = svc.create_user(input("dedi", UserRole::Operator)).await.unwrap();
        assert_eq!(user.nip, None);
        assert_eq!(user.position.as_deref(), Some("Teknisi"));
        assert_eq!(user.role(), Some(UserRole::Operator));
    }

    #[tokio::test]
    async fn email_is_stored_lowercase_and_unique_across_case() {
        let svc = service(false).await;
        let mut first = input("alan", UserRole::Operator);
        first.email = " Alan@TVRI.local ".into();
        svc.create_user(first).await.unwrap();

        let mut second = input("alan2", UserRole::Operator);
        second.email = "alan@tvri.local".into();
        assert!(matches!(
            svc.create_user(second).await.unwrap_err(),
            DomainError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = service(false).await;
        let mut i = input("dedi", UserRole::Operator);
        i.password = "12345".into();
        assert!(matches!(
            svc.create_user(i).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn signup_requires_flag_and_matching_passwords() {
        let signup = |confirm: &str| SignupInput {
            name: "Sari".into(),
            username: "sari".into(),
            email: "sari@tvri.local".into(),
            password: "rahasia".into(),
            confirm_password: confirm.into(),
        };

        let closed = service(false).await;
        assert!(matches!(
            closed.signup(signup("rahasia")).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));

        let open = service(true).await;
        let err = open.signup(signup("berbeda")).await.unwrap_err();
        assert_eq!(err.to_string(), "Password tidak cocok");

        let user = open.signup(signup("rahasia")).await.unwrap();
        assert_eq!(user.role(), Some(UserRole::Operator));
    }

    #[tokio::test]
    async fn listing_marks_own_row_and_filters() {
        let db = test_db().await;
        let admin = seed_user(&db, "admin", UserRole::Admin).await;
        seed_user(&db, "alan", UserRole::Operator).await;
        let svc = UserService::new(Arc::new(UserRepository::new(db)), false);

        let all = svc.list_users(None, &admin.id).await.unwrap();
        assert_eq!(all.len(), 2);
        let own = all.iter().find(|l| l.user.id == admin.id).unwrap();
        assert!(!own.can_delete);
        assert!(all.iter().filter(|l| l.user.id != admin.id).all(|l| l.can_delete));

        let operators = svc.list_users(Some("OPERATOR"), &admin.id).await.unwrap();
        assert_eq!(operators.len(), 1);
        assert_eq!(operators[0].user.username, "alan");
    }

    #[tokio::test]
    async fn cannot_delete_self() {
        let db = test_db().await;
        let admin = seed_user(&db, "admin", UserRole::Admin).await;
        let svc = UserService::new(Arc::new(UserRepository::new(db)), false);
        assert!(matches!(
            svc.delete_user(&admin.id, &admin.id).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn default_admin_only_on_empty_store() {
        let svc = service(false).await;
        let cfg = AdminConfig::default();
        let created = svc.ensure_default_admin(&cfg).await.unwrap().unwrap();
        assert_eq!(created.role(), Some(UserRole::Admin));
        assert!(svc.ensure_default_admin(&cfg).await.unwrap().is_none());
    }
}
