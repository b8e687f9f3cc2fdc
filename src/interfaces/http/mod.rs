//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON
//! - `middleware`: session resolution (Bearer or cookie) and admin gate
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;


pub use common::ApiResponse;
pub use router::{create_api_router, ApiDoc, ApiState};
