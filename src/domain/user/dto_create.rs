use super::UserRole;

/// Everything needed to create an auth account together with its profile.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub nip: Option<String>,
    pub position: Option<String>,
}
