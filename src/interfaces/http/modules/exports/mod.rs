//! Export module: spreadsheet and PDF downloads of the filtered report list

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
