use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::auth::UserRole;
use shared_models::error::AppError;

pub const CURRENT_ROLE_KEY: &str = "currentRole";
pub const IS_AUTHENTICATED_KEY: &str = "isAuthenticated";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

/// Built-in front-desk accounts. These are mock credentials, not secrets.
pub(crate) struct MockAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub role: UserRole,
}

pub(crate) const MOCK_ACCOUNTS: [MockAccount; 2] = [
    MockAccount {
        username: "receptionist",
        password: "receptionist123",
        role: UserRole::Receptionist,
    },
    MockAccount {
        username: "doctor",
        password: "doctor123",
        role: UserRole::Doctor,
    },
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        AppError::Auth(error.to_string())
    }
}
