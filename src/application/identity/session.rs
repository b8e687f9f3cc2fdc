//! Session resolution: turns a bearer token into an [`AuthContext`] or a
//! rejection, and owns sign-in / refresh / sign-out.

use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::events::{SessionEvent, SharedEventBus};
use crate::domain::{
    DomainError, DomainResult, NewSession, SessionRepositoryInterface, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::{
    create_access_token, generate_refresh_token, hash_refresh_token, verify_access_token,
    verify_password, JwtConfig,
};

/// Why a request was not given a session. Every variant sends the client
/// back to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionRejection {
    #[error("Sesi tidak valid, silakan login kembali")]
    Unauthenticated,
    #[error("Profil pengguna tidak ditemukan")]
    InvalidProfile,
    #[error("Role pengguna tidak valid")]
    InvalidRole,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email atau password salah")]
    InvalidCredentials,
    #[error(transparent)]
    Rejected(#[from] SessionRejection),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Failed to issue token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Per-request identity, inserted into request extensions by the session
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: String,
    pub session_id: String,
    pub profile: User,
    pub role: UserRole,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Tokens handed to the client after login or refresh.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub context: AuthContext,
}

pub struct SessionService<U: UserRepositoryInterface, S: SessionRepositoryInterface> {
    users: Arc<U>,
    sessions: Arc<S>,
    jwt_config: JwtConfig,
    session_ttl: Duration,
    events: SharedEventBus,
}

impl<U: UserRepositoryInterface, S: SessionRepositoryInterface> SessionService<U, S> {
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        jwt_config: JwtConfig,
        session_ttl: Duration,
        events: SharedEventBus,
    ) -> Self {
        Self {
            users,
            sessions,
            jwt_config,
            session_ttl,
            events,
        }
    }

    // ── Sign-in ─────────────────────────────────────────────────

    /// Verify credentials, open a session and bind it to the profile.
    /// A missing profile or unknown role signs the new session out again.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let account = self
            .users
            .get_account_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let refresh_token = generate_refresh_token();
        let session = self
            .sessions
            .create_session(NewSession {
                account_id: account.id.clone(),
                refresh_token_hash: hash_refresh_token(&refresh_token),
                expires_at: Utc::now() + self.session_ttl,
            })
            .await?;

        let context = self.bind_profile(&account.id, &session.id).await?;
        let access_token = create_access_token(&account.id, &session.id, &self.jwt_config)?;

        info!(account_id = %account.id, session_id = %session.id, role = %context.role, "User signed in");
        self.events.publish(SessionEvent::SignedIn {
            account_id: account.id,
            session_id: session.id,
        });

        Ok(IssuedSession {
            access_token,
            refresh_token,
            expires_in: self.jwt_config.access_token_minutes * 60,
            context,
        })
    }

    // ── Resolution ──────────────────────────────────────────────

    /// Resolve an access token to the caller's identity.
    ///
    /// Storage failures count as an invalid session; nothing is retried.
    pub async fn resolve(&self, access_token: &str) -> Result<AuthContext, SessionRejection> {
        let claims = verify_access_token(access_token, &self.jwt_config)
            .map_err(|_| SessionRejection::Unauthenticated)?;

        let session = match self.sessions.get_session(&claims.sid).await {
            Ok(Some(session)) => session,
            Ok(None) => return Err(SessionRejection::Unauthenticated),
            Err(e) => {
                warn!(session_id = %claims.sid, error = %e, "Session lookup failed");
                return Err(SessionRejection::Unauthenticated);
            }
        };

        if session.account_id != claims.sub || !session.is_active(Utc::now()) {
            return Err(SessionRejection::Unauthenticated);
        }

        self.bind_profile(&session.account_id, &session.id).await
    }

    /// Exchange a refresh token for a new access token. The profile is
    /// re-checked first.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedSession, AuthError> {
        let hash = hash_refresh_token(refresh_token);
        let session = match self.sessions.get_session_by_refresh_hash(&hash).await {
            Ok(Some(session)) if session.is_active(Utc::now()) => session,
            Ok(_) => return Err(SessionRejection::Unauthenticated.into()),
            Err(e) => {
                warn!(error = %e, "Refresh lookup failed");
                return Err(SessionRejection::Unauthenticated.into());
            }
        };

        let context = self.bind_profile(&session.account_id, &session.id).await?;
        let access_token = create_access_token(&session.account_id, &session.id, &self.jwt_config)?;

        self.events.publish(SessionEvent::TokenRefreshed {
            account_id: session.account_id,
            session_id: session.id,
        });

        Ok(IssuedSession {
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in: self.jwt_config.access_token_minutes * 60,
            context,
        })
    }

    pub async fn logout(&self, context: &AuthContext) -> DomainResult<()> {
        self.sessions.revoke_session(&context.session_id).await?;

        info!(account_id = %context.account_id, session_id = %context.session_id, "User signed out");
        self.events.publish(SessionEvent::SignedOut {
            account_id: context.account_id.clone(),
            session_id: context.session_id.clone(),
        });
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn bind_profile(
        &self,
        account_id: &str,
        session_id: &str,
    ) -> Result<AuthContext, SessionRejection> {
        let profile = match self.users.get_user_by_id(account_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(account_id, error = %e, "Profile lookup failed");
                return Err(SessionRejection::Unauthenticated);
            }
        };

        let Some(profile) = profile else {
            self.invalidate(account_id, session_id, SessionRejection::InvalidProfile)
                .await;
            return Err(SessionRejection::InvalidProfile);
        };

        let Some(role) = profile.role() else {
            self.invalidate(account_id, session_id, SessionRejection::InvalidRole)
                .await;
            return Err(SessionRejection::InvalidRole);
        };

        Ok(AuthContext {
            account_id: account_id.to_string(),
            session_id: session_id.to_string(),
            profile,
            role,
        })
    }

    /// Force sign-out of a session whose profile no longer qualifies.
    async fn invalidate(&self, account_id: &str, session_id: &str, reason: SessionRejection) {
        if let Err(e) = self.sessions.revoke_session(session_id).await {
            warn!(session_id, error = %e, "Failed to revoke invalidated session");
        }

        metrics::counter!("sessions_invalidated_total").increment(1);
        warn!(account_id, session_id, reason = %reason, "Session invalidated");

        self.events.publish(SessionEvent::Invalidated {
            account_id: account_id.to_string(),
            session_id: session_id.to_string(),
            reason: reason.to_string(),
        });
    }
}
