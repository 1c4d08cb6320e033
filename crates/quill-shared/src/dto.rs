//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are kept as raw JSON values so that a missing, null or
//! wrongly-typed field reaches validation instead of failing deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/posts` and `PUT /api/posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: Option<Value>,
}

/// Full representation of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
