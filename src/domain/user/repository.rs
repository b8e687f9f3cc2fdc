use async_trait::async_trait;

use super::{Account, CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Creates the auth account and the profile row atomically.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// All profiles, newest first.
    async fn list_users(&self) -> DomainResult<Vec<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;

    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    async fn get_account_by_id(&self, id: &str) -> DomainResult<Option<Account>>;

    /// Removes the profile row only; the auth account is left in place.
    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
