use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::factory;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: i64, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(3, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.find_by_id(3).await.unwrap().unwrap();

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 3);
}

#[tokio::test]
async fn test_find_post_by_id_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Option<Post> = repo.find_by_id(10000).await.unwrap();

    assert!(post.is_none());
}

#[tokio::test]
async fn test_find_all_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, "first"), post_model(2, "second")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts: Vec<Post> = repo.find_all().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].title, "second");
}

#[tokio::test]
async fn test_create_post_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(15, "El titulo")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .create(factory::post().title("El titulo").build())
        .await
        .unwrap();

    assert_eq!(post.id, 15);
    assert_eq!(post.title, "El titulo");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let ghost = factory::post().build().into_post(10000);

    let result: Result<Post, RepoError> = repo.update(ghost).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i64>::delete(&repo, 10000).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i64>::delete(&repo, 1).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_find_user_by_email() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: 1,
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_email("ana@example.com").await.unwrap().unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Ana");
}
