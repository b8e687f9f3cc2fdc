//! Reports module: shift report CRUD, listing filters and the staff roster

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
