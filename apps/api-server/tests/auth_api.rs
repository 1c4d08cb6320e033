#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use common::{acting_as, state};

fn register_request(email: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/auth/register").set_json(json!({
        "name": "Ana",
        "email": email,
        "password": "correct-horse",
    }))
}

#[actix_rt::test]
async fn test_register_issues_usable_token() {
    let state = state();
    let app = test_app!(state);

    let resp = test::call_service(&app, register_request("ana@example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let token = body["access_token"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(json!({ "title": "Primer post" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn test_register_duplicate_email_conflicts() {
    let state = state();
    let app = test_app!(state);

    let first = test::call_service(&app, register_request("dup@example.com").to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(&app, register_request("DUP@example.com").to_request()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_register_validation() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "no-at-sign", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    for field in ["name", "email", "password"] {
        assert!(body["errors"][field].is_array(), "missing {}", field);
    }
    assert!(state.users.find_all().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_login() {
    let state = state();
    let app = test_app!(state);
    test::call_service(&app, register_request("login@example.com").to_request()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "login@example.com", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "login@example.com", "password": "wrong-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_login_validation() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "login@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["password"][0], "The password field is required.");
    assert!(body["errors"].get("email").is_none());
}

#[actix_rt::test]
async fn test_login_form_encoded() {
    let state = state();
    let app = test_app!(state);
    test::call_service(&app, register_request("form@example.com").to_request()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_form([("email", "form@example.com"), ("password", "correct-horse")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
}

#[actix_rt::test]
async fn test_me() {
    let state = state();
    let app = test_app!(state);
    let (auth, user) = acting_as(&state).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], user.id);
    assert_eq!(body["email"], user.email.as_str());
    assert!(body.get("password_hash").is_none());

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let request_id = resp.headers().get("x-request-id").cloned().unwrap();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["request_id"], request_id.to_str().unwrap());
}
