//! Authentication stage and extractors.
//!
//! [`authenticate`] turns request headers into an [`Identity`]. [`RequireAuth`]
//! runs it in front of a whole scope so that unauthenticated requests are
//! answered with 401 before any handler, body extractor or repository runs.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{StatusCode, header, header::HeaderMap},
    web,
};

use quill_core::ports::{AuthError, TokenClaims, TokenService};
use quill_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Resolve the principal of a request from its `Authorization` header.
pub fn authenticate(headers: &HeaderMap, tokens: &dyn TokenService) -> Result<Identity, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    tokens.validate_token(token).map(Identity::from)
}

fn authenticate_request(req: &HttpRequest) -> Result<Identity, AuthError> {
    match req.app_data::<web::Data<AppState>>() {
        Some(state) => authenticate(req.headers(), state.tokens.as_ref()),
        None => {
            tracing::error!("AppState not found in app data");
            Err(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized(),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Set by RequireAuth when the route sits behind it.
        if let Some(identity) = req.extensions().get::<Identity>().cloned() {
            return ready(Ok(identity));
        }

        ready(authenticate_request(req).map_err(AuthenticationError))
    }
}

/// Middleware factory rejecting every request without a valid principal.
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthService { service }))
    }
}

pub struct RequireAuthService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate_request(req.request()) {
            Ok(identity) => {
                tracing::debug!(user_id = identity.user_id, "Request authenticated");
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                tracing::debug!(
                    method = %req.method(),
                    path = %req.path(),
                    reason = %e,
                    "Rejected unauthenticated request"
                );

                let response = AuthenticationError(e).error_response();
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}
