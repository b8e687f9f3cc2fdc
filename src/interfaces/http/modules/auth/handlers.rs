//! Authentication API handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use super::dto::{LoginRequest, RefreshRequest, SessionResponse, SignupRequest};
use crate::application::identity::{
    AuthContext, AuthError, IssuedSession, SignupInput, UserService,
};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{AppSessionService, SessionState};
use crate::interfaces::http::modules::users::UserDto;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub sessions: Arc<AppSessionService>,
    pub user_service: Arc<UserService<UserRepository>>,
    pub session: SessionState,
}

impl AuthHandlerState {
    /// Set both session cookies and echo the tokens in the body.
    fn issue(
        &self,
        jar: CookieJar,
        issued: IssuedSession,
    ) -> (CookieJar, Json<ApiResponse<SessionResponse>>) {
        let cookies = &self.session.cookies;
        let jar = jar
            .add(cookies.access_cookie(&issued.access_token))
            .add(cookies.refresh_cookie(&issued.refresh_token));

        let response = SessionResponse {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: UserDto::from(issued.context.profile),
        };
        (jar, Json(ApiResponse::success(response)))
    }

    fn auth_failure(&self, jar: CookieJar, e: AuthError) -> Response {
        match e {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response(),
            AuthError::Rejected(rejection) => self.session.reject(jar, &rejection.to_string()),
            AuthError::Domain(e) => domain_error::<()>(e).into_response(),
            AuthError::Token(e) => {
                error!(error = %e, "Failed to issue access token");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error("Gagal membuat sesi")),
                )
                    .into_response()
            }
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; session cookies set", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Invalid credentials or invalid profile"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), Response> {
    match state.sessions.login(&request.email, &request.password).await {
        Ok(issued) => Ok(state.issue(jar, issued)),
        Err(e) => Err(state.auth_failure(jar, e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Operator account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Sign-up disabled"),
        (status = 409, description = "Email or username taken")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let input = SignupInput {
        name: request.name,
        username: request.username,
        email: request.email,
        password: request.password,
        confirm_password: request.confirm_password,
    };

    match state.user_service.signup(input).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(user))),
        )),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    request_body(content = RefreshRequest, description = "Optional; the refresh cookie is used when omitted"),
    responses(
        (status = 200, description = "New access token issued", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Session expired, revoked or invalid")
    )
)]
pub async fn refresh(
    State(state): State<AuthHandlerState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), Response> {
    let from_body = if body.is_empty() {
        RefreshRequest::default()
    } else {
        serde_json::from_slice::<RefreshRequest>(&body).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(format!(
                    "Format permintaan tidak valid: {}",
                    e
                ))),
            )
                .into_response()
        })?
    };

    let token = from_body
        .refresh_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| state.session.cookies.refresh_token(&jar).map(String::from));

    let Some(token) = token else {
        return Err(state.session.reject(jar, "Silakan login terlebih dahulu"));
    };

    match state.sessions.refresh(&token).await {
        Ok(issued) => Ok(state.issue(jar, issued)),
        Err(AuthError::InvalidCredentials) => {
            Err(state.session.reject(jar, "Sesi tidak valid, silakan login kembali"))
        }
        Err(e) => Err(state.auth_failure(jar, e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed out; session cookies cleared"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    Extension(context): Extension<AuthContext>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), (StatusCode, Json<ApiResponse<()>>)> {
    state.sessions.logout(&context).await.map_err(domain_error)?;
    Ok((
        state.session.cookies.clear(jar),
        Json(ApiResponse::success(())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    Extension(context): Extension<AuthContext>,
) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(UserDto::from(context.profile)))
}
