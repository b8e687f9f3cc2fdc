//! Domain layer
//!
//! Aggregates (user, report, session), their DTOs and the repository
//! interfaces the application layer depends on.

pub mod report;
pub mod session;
pub mod user;

pub use report::{
    BroadcastReport, NewReport, Quality, ReportDraft, ReportFilter, ReportMonth,
    ReportRepositoryInterface, ReportStats,
};
pub use session::{NewSession, Session, SessionRepositoryInterface};
pub use user::{Account, CreateUserDto, User, UserRepositoryInterface, UserRole};

pub use crate::shared::errors::{DomainError, DomainResult};
