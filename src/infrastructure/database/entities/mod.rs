//! Database entities module

pub mod auth_account;
pub mod broadcast_report;
pub mod session;
pub mod user;

pub use auth_account::Entity as AuthAccount;
pub use broadcast_report::Entity as BroadcastReport;
pub use session::Entity as Session;
pub use user::Entity as User;
