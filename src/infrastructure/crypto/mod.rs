//! Token signing, password hashing and refresh-token generation.

pub mod jwt;
pub mod password;
pub mod session_token;

pub use jwt::{create_access_token, verify_access_token, AccessClaims, JwtConfig};
pub use password::{hash_password, verify_password};
pub use session_token::{generate_refresh_token, hash_refresh_token};
