//! Integration tests for registration and login.
//!
//! Requires a PostgreSQL test database; run with `cargo test -- --ignored`.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_register_and_login() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new();
    let auth = create_authenticated_user(&app, &user).await;
    assert_eq!(auth.email, user.email);
    assert!(!auth.access_token.is_empty());

    // Login with username
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({"username": user.username, "password": user.password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["user"]["id"].as_str().unwrap(), auth.user_id);
    assert!(body["tokens"]["access_token"].as_str().is_some());

    // Login with email also works
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({"username": user.email, "password": user.password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_register_rejects_duplicate_email() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new();
    create_authenticated_user(&app, &user).await;

    let duplicate = TestUser::new().with_email(&user.email);
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            serde_json::json!({
                "username": duplicate.username,
                "email": duplicate.email,
                "password": duplicate.password,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_login_rejects_wrong_password() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new();
    create_authenticated_user(&app, &user).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({"username": user.username, "password": "wrong-password1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_register_grants_default_role_and_me_works() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new();
    let auth = create_authenticated_user(&app, &user).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/users/me", &auth.access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["username"].as_str().unwrap(), user.username);
    assert!(body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r == "user"));
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_me_requires_token() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri("/api/users/me")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
