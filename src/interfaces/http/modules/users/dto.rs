//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::identity::UserListing;
use crate::domain::{User, UserRole};

/// Profile API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            role: u.role,
            nip: u.nip,
            position: u.position,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Listed user with the viewer's capability on it
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListItemDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub can_delete: bool,
}

impl From<UserListing> for UserListItemDto {
    fn from(listing: UserListing) -> Self {
        Self {
            user: UserDto::from(listing.user),
            can_delete: listing.can_delete,
        }
    }
}

/// Create user request. Presence and password length are checked by the
/// service so the form sees one message at a time.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub nip: Option<String>,
    pub position: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::Operator
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Case-insensitive match on name, username or role
    pub search: Option<String>,
}
