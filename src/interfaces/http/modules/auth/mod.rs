//! Authentication module: login, sign-up, refresh, logout, profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
