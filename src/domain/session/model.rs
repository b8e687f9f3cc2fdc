use chrono::{DateTime, Utc};

/// A signed-in session. Access tokens reference it by id, refresh tokens
/// by the SHA-256 of their value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub account_id: String,
    pub refresh_token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

#[derive(Clone, Debug)]
pub struct NewSession {
    pub account_id: String,
    pub refresh_token_hash: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_in: Duration, revoked: bool) -> Session {
        let now = Utc::now();
        Session {
            id: "s1".into(),
            account_id: "a1".into(),
            refresh_token_hash: "h".into(),
            created_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn active_until_expiry() {
        assert!(session(Duration::hours(1), false).is_active(Utc::now()));
        assert!(!session(Duration::hours(-1), false).is_active(Utc::now()));
    }

    #[test]
    fn revoked_is_never_active() {
        assert!(!session(Duration::hours(1), true).is_active(Utc::now()));
    }
}
