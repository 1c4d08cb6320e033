//! Authentication handlers - credential issuance for API clients.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::DomainError;
use quill_core::domain::NewUser;
use quill_core::ports::AuthError;
use quill_core::validation;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use super::parse_body;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(state: &AppState, user_id: i64, email: &str) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(user_id, email, vec!["user".to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let payload: RegisterUserRequest = parse_body(&req, &body)?;
    let reg = validation::registration(
        payload.name.as_ref(),
        payload.email.as_ref(),
        payload.password.as_ref(),
    )?;

    if state.users.find_by_email(&reg.email).await?.is_some() {
        return Err(DomainError::Duplicate("Email already registered".to_string()).into());
    }

    let password_hash = state.passwords.hash(&reg.password)?;
    let user = state
        .users
        .create(NewUser::new(reg.name, reg.email, password_hash))
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(HttpResponse::Created().json(issue_token(&state, user.id, &user.email)?))
}

/// POST /api/auth/login
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let payload: LoginRequest = parse_body(&req, &body)?;
    let credentials = validation::credentials(payload.email.as_ref(), payload.password.as_ref())?;

    let user = state
        .users
        .find_by_email(&credentials.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&credentials.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(HttpResponse::Ok().json(issue_token(&state, user.id, &user.email)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
    }))
}
