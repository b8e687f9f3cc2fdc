//! Dashboard module: report totals and the most recent entries

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
