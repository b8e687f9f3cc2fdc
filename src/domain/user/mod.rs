//! User aggregate
//!
//! Contains the profile/account models, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{Account, User, UserRole};

pub use dto_create::CreateUserDto;

pub use repository::UserRepositoryInterface;
