//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};

use quill_core::domain::{NewPost, NewUser, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, read_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email address for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head: String = local.chars().take(1).collect();
            if local.chars().count() > 1 {
                format!("{}***@{}", head, domain)
            } else {
                format!("***@{}", domain)
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(write_error)?;

        tracing::debug!(post_id = model.id, "Inserted post");
        Ok(model.into())
    }
}
