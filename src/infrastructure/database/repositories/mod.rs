//! Database repository implementations
//!
//! One SeaORM repository per aggregate, each implementing the matching
//! domain trait.

pub mod report_repository;
pub mod session_repository;
pub mod user_repository;

pub use report_repository::ReportRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Unique-constraint violations become `Conflict(message)`.
fn conflict_or_db_err(e: DbErr, message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(message.to_string()),
        _ => db_err(e),
    }
}
