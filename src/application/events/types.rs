use chrono::{DateTime, Utc};
use serde::Serialize;

/// Things that happen to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    SignedIn {
        account_id: String,
        session_id: String,
    },
    SignedOut {
        account_id: String,
        session_id: String,
    },
    TokenRefreshed {
        account_id: String,
        session_id: String,
    },
    /// The session was terminated because its profile is missing or
    /// carries an unknown role.
    Invalidated {
        account_id: String,
        session_id: String,
        reason: String,
    },
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn { .. } => "signed_in",
            SessionEvent::SignedOut { .. } => "signed_out",
            SessionEvent::TokenRefreshed { .. } => "token_refreshed",
            SessionEvent::Invalidated { .. } => "invalidated",
        }
    }

    pub fn account_id(&self) -> &str {
        match self {
            SessionEvent::SignedIn { account_id, .. }
            | SessionEvent::SignedOut { account_id, .. }
            | SessionEvent::TokenRefreshed { account_id, .. }
            | SessionEvent::Invalidated { account_id, .. } => account_id,
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            SessionEvent::SignedIn { session_id, .. }
            | SessionEvent::SignedOut { session_id, .. }
            | SessionEvent::TokenRefreshed { session_id, .. }
            | SessionEvent::Invalidated { session_id, .. } => session_id,
        }
    }
}

/// Event plus the time it was published.
#[derive(Debug, Clone, Serialize)]
pub struct EventMessage {
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

impl EventMessage {
    pub fn new(event: SessionEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}
