#![allow(dead_code)]

use actix_web::http::header::{self, HeaderName};

use api_server::state::AppState;
use quill_core::domain::User;
use quill_core::factory;
use quill_infra::JwtConfig;

/// Build an initialized test service over the given state.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(api_server::observability::RequestIdMiddleware)
                .configure(api_server::configure_app($state.clone())),
        )
        .await
    };
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "feature-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    }
}

/// Fresh in-memory state.
pub fn state() -> AppState {
    AppState::in_memory(jwt_config())
}

/// Store a user and return an `Authorization` header authenticating as them.
pub async fn acting_as(state: &AppState) -> ((HeaderName, String), User) {
    let user = state
        .users
        .create(factory::user().build())
        .await
        .expect("factory user should be stored");

    let token = state
        .tokens
        .generate_token(user.id, &user.email, vec!["user".to_string()])
        .expect("token should be issued");

    ((header::AUTHORIZATION, format!("Bearer {}", token)), user)
}

/// Keys of a JSON object, sorted.
pub fn keys(value: &serde_json::Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    keys
}

pub const POST_KEYS: [&str; 4] = ["created_at", "id", "title", "updated_at"];
