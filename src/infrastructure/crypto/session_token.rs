//! Opaque refresh tokens. Only the SHA-256 digest is persisted.

use rand::Rng;
use sha2::{Digest, Sha256};

/// 32 random bytes, hex encoded.
pub fn generate_refresh_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
