//! User management API handlers
//!
//! Admin-only endpoints. Delegates to `UserService` from the
//! application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateUserRequest, ListUsersParams, UserDto, UserListItemDto};
use crate::application::identity::{AuthContext, NewUserInput, UserService};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{domain_error, ApiResponse};

/// User handler state, concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "Users, newest first", body = ApiResponse<Vec<UserListItemDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(context): Extension<AuthContext>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<Vec<UserListItemDto>>>, (StatusCode, Json<ApiResponse<Vec<UserListItemDto>>>)>
{
    let users = state
        .user_service
        .list_users(params.search.as_deref(), &context.account_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserListItemDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username taken")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let input = NewUserInput {
        name: request.name,
        username: request.username,
        email: request.email,
        password: request.password,
        role: request.role,
        nip: request.nip,
        position: request.position,
    };

    match state.user_service.create_user(input).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(user))),
        )),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Cannot delete own account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.user_service.delete_user(&id, &context.account_id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(domain_error(e)),
    }
}
