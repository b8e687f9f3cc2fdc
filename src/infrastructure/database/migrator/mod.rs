//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_auth_accounts;
mod m20240101_000002_create_users;
mod m20240101_000003_create_sessions;
mod m20240101_000004_create_broadcast_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_auth_accounts::Migration),
            Box::new(m20240101_000002_create_users::Migration),
            Box::new(m20240101_000003_create_sessions::Migration),
            Box::new(m20240101_000004_create_broadcast_reports::Migration),
        ]
    }
}
