//! # Authentication payloads
//!
//! The login response is loosely shaped on the wire (`token` may be missing,
//! `user` may be absent, null or malformed). [`AuthResponse`] captures that raw
//! shape; [`AuthResponse::into_grant`] is the boundary check that turns it into
//! a [`LoginGrant`] or rejects it with [`ApiError::InvalidAuthResponse`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;
use crate::models::identity::{Identity, Role};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Required by the backend for doctors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Raw login/register response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    /// A user record that does not parse as an [`Identity`] is ignored.
    #[serde(default, deserialize_with = "lenient_identity")]
    pub user: Option<Identity>,
}

fn lenient_identity<'de, D>(deserializer: D) -> Result<Option<Identity>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A validated login result: a non-empty token and, when the server sent
/// one, the user record.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    pub identity: Option<Identity>,
}

impl AuthResponse {
    /// Parse a response body. Anything that is not a JSON object with a
    /// string `token` is a contract violation.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|_| ApiError::InvalidAuthResponse)
    }

    pub fn into_grant(self) -> Result<LoginGrant, ApiError> {
        match self.token {
            Some(token) if !token.is_empty() => Ok(LoginGrant {
                token,
                identity: self.user,
            }),
            _ => Err(ApiError::InvalidAuthResponse),
        }
    }
}

/// Response of `GET /auth/check-email`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EmailCheck {
    pub exists: bool,
}
