use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Every stored entity, ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` if it is gone.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Store a new user and return it with its assigned ID.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Store a new post and return it with its assigned ID.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;
}
