//! Session middleware
//!
//! Resolves the caller's access token (Bearer header or session cookie)
//! into an [`AuthContext`] request extension. Every rejection is a `401`
//! carrying `redirect_to` and clears the session cookies.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::application::identity::{AuthContext, SessionService};
use crate::config::{AuthConfig, SecurityConfig};
use crate::infrastructure::database::repositories::{SessionRepository, UserRepository};

/// Session service over the SeaORM repositories.
pub type AppSessionService = SessionService<UserRepository, SessionRepository>;

const MSG_ADMIN_ONLY: &str = "Akses ditolak: hanya admin";

/// Cookie names and flags for the access and refresh tokens.
#[derive(Clone, Debug)]
pub struct SessionCookies {
    pub name: String,
    pub secure: bool,
}

impl SessionCookies {
    pub fn from_security(security: &SecurityConfig) -> Self {
        Self {
            name: security.cookie_name.clone(),
            secure: security.cookie_secure,
        }
    }

    pub fn refresh_name(&self) -> String {
        format!("{}_refresh", self.name)
    }

    fn build(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn access_cookie(&self, token: &str) -> Cookie<'static> {
        self.build(self.name.clone(), token.to_string())
    }

    pub fn refresh_cookie(&self, token: &str) -> Cookie<'static> {
        self.build(self.refresh_name(), token.to_string())
    }

    /// Add removal cookies for both tokens.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut access = self.build(self.name.clone(), String::new());
        access.make_removal();
        let mut refresh = self.build(self.refresh_name(), String::new());
        refresh.make_removal();
        jar.add(access).add(refresh)
    }

    pub fn access_token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.name).map(|c| c.value()).filter(|v| !v.is_empty())
    }

    pub fn refresh_token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.refresh_name())
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
    }
}

/// State for [`session_middleware`].
#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<AppSessionService>,
    pub cookies: SessionCookies,
    pub login_redirect_url: String,
}

impl SessionState {
    pub fn new(
        sessions: Arc<AppSessionService>,
        security: &SecurityConfig,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            sessions,
            cookies: SessionCookies::from_security(security),
            login_redirect_url: auth.login_redirect_url.clone(),
        }
    }

    /// `401` with the login redirect and cleared cookies.
    pub fn reject(&self, jar: CookieJar, message: &str) -> Response {
        let body = Json(json!({
            "success": false,
            "error": message,
            "redirect_to": self.login_redirect_url,
        }));
        (StatusCode::UNAUTHORIZED, self.cookies.clear(jar), body).into_response()
    }
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the session and attach `AuthContext`, or reject.
pub async fn session_middleware(
    State(state): State<SessionState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = bearer_token(&request)
        .or_else(|| state.cookies.access_token(&jar))
        .map(String::from);

    let Some(token) = token else {
        return state.reject(jar, "Silakan login terlebih dahulu");
    };

    match state.sessions.resolve(&token).await {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(rejection) => state.reject(jar, &rejection.to_string()),
    }
}

/// Admin gate; must run inside [`session_middleware`].
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<AuthContext>()
        .map(AuthContext::is_admin);

    match is_admin {
        Some(true) => next.run(request).await,
        Some(false) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "success": false, "error": MSG_ADMIN_ONLY })),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Silakan login terlebih dahulu" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cookies() -> SessionCookies {
        SessionCookies {
            name: "siaran_session".into(),
            secure: false,
        }
    }

    #[test]
    fn bearer_token_is_extracted() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("abc.def"));

        let request = Request::builder()
            .header(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), None);
    }

    #[test]
    fn cookies_are_read_by_name() {
        let jar = CookieJar::new()
            .add(Cookie::new("siaran_session", "access"))
            .add(Cookie::new("siaran_session_refresh", "refresh"));
        assert_eq!(cookies().access_token(&jar), Some("access"));
        assert_eq!(cookies().refresh_token(&jar), Some("refresh"));
    }

    #[test]
    fn clearing_emits_removal_cookies() {
        let jar = cookies().clear(CookieJar::new());
        let access = jar.get("siaran_session").unwrap();
        assert_eq!(access.value(), "");
        assert!(access.max_age().is_some_and(|age| age.is_zero()));
        assert!(jar.get("siaran_session_refresh").is_some());
    }
}
