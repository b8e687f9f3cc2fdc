pub mod auth;
pub mod dashboard;
pub mod exports;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod reports;
pub mod users;
