//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM. Without it
//!   only the in-memory repositories are available.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use memory::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
