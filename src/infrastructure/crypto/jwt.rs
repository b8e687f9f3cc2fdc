//! Short-lived access tokens bound to a session row.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_minutes: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_security(security: &SecurityConfig) -> Self {
        Self {
            secret: security.jwt_secret.clone(),
            access_token_minutes: security.access_token_minutes,
            issuer: "siaran-report".to_string(),
        }
    }
}

/// Access token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Auth account id
    pub sub: String,
    /// Session id
    pub sid: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl AccessClaims {
    pub fn new(account_id: &str, session_id: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(config.access_token_minutes);

        Self {
            sub: account_id.to_string(),
            sid: session_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

pub fn create_access_token(
    account_id: &str,
    session_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AccessClaims::new(account_id, session_id, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer and expiry.
pub fn verify_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            access_token_minutes: 5,
            issuer: "siaran-report".into(),
        }
    }

    #[test]
    fn round_trip_keeps_session_binding() {
        let token = create_access_token("acc-1", "sess-1", &config()).unwrap();
        let claims = verify_access_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "acc-1");
        assert_eq!(claims.sid, "sess-1");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_access_token("acc-1", "sess-1", &config()).unwrap();
        let mut other = config();
        other.secret = "other".into();
        assert!(verify_access_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut cfg = config();
        cfg.access_token_minutes = -10;
        let token = create_access_token("acc-1", "sess-1", &cfg).unwrap();
        assert!(verify_access_token(&token, &config()).is_err());
    }
}
