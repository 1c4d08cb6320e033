//! Post resource handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::DomainError;
use quill_core::domain::{NewPost, Post};
use quill_core::error::RepoError;
use quill_shared::Collection;
use quill_shared::dto::{PostPayload, PostResponse};

use super::parse_body;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
    .into()
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /api/posts
pub async fn index(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    let body: Collection<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts
pub async fn store(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let payload: PostPayload = parse_body(&req, &body)?;
    let draft = NewPost::from_input(payload.title.as_ref())?;

    let post = state.posts.create(draft).await?;
    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let payload: PostPayload = parse_body(&req, &body)?;
    post.apply_title(payload.title.as_ref())?;

    let post = state.posts.update(post).await.map_err(|e| match e {
        RepoError::NotFound => not_found(id),
        other => other.into(),
    })?;
    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => not_found(id),
        other => other.into(),
    })?;
    tracing::info!(post_id = id, user_id = identity.user_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
