use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - the authentication principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a new user with the current timestamp.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Materialize with the id assigned by storage.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
