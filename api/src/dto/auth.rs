use serde::{Deserialize, Serialize};
use validator::Validate;

use ev_core::domain::entities::token::IssuedToken;
use ev_core::domain::entities::user::User;

/// Query parameters for POST /api/v1/auth/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub last_name: Option<String>,

    #[validate(length(min = 3, max = 200))]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

/// Query parameters for POST /api/v1/auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 200))]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

/// Token payload returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    pub token_type: String, // always "bearer"
    pub expires_in: i64,
}

impl From<IssuedToken> for TokenData {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Profile returned by validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Response envelope shared by all auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> MessageResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutData {
    pub token_version: u64,
}
