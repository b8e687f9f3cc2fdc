//! # Laporan TD Penyiaran
//!
//! Broadcast quality reporting service for TVRI technical directors.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Users, broadcast reports, sessions and repository traits
//! - **application**: Session resolution, report form handling, user management, export
//! - **infrastructure**: Database (SeaORM), crypto (JWT, bcrypt, session tokens)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
