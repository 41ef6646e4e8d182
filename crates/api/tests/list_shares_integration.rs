//! Integration tests for list share management.
//!
//! Requires a PostgreSQL test database; run with `cargo test -- --ignored`.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_share_uniqueness_per_list_and_user() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let bob = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    let share_body = serde_json::json!({"user_id": bob.user_id, "permission_level": "VIEWER"});
    let uri = format!("/api/shoppinglists/{}/shares", list_id);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &uri,
            share_body.clone(),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // A second share for the same (list, user) pair always fails.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &uri,
            share_body,
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_owner_cannot_be_shared_explicitly() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/shares", list_id),
            serde_json::json!({"user_id": alice.user_id, "permission_level": "EDITOR"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_owner_share_cannot_be_deleted() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let bob = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    // Give Bob ADMIN so he could manage shares.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/shares", list_id),
            serde_json::json!({"user_id": bob.user_id, "permission_level": "ADMIN"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Find the owner's bootstrap share.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/shoppinglists/{}/shares", list_id),
            &bob.access_token,
        ))
        .await
        .unwrap();
    let shares = parse_response_body(response).await;
    let owner_share_id = shares
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["shared_user_id"].as_str().unwrap() == alice.user_id)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Even an ADMIN requester cannot delete it; neither can the owner.
    for token in [&bob.access_token, &alice.access_token] {
        let response = app
            .clone()
            .oneshot(delete_request_with_auth(
                &format!("/api/shoppinglists/{}/shares/{}", list_id, owner_share_id),
                token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_share_create_requires_admin() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let editor = create_authenticated_user(&app, &TestUser::new()).await;
    let target = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/shares", list_id),
            serde_json::json!({"user_id": editor.user_id, "permission_level": "EDITOR"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // An EDITOR cannot manage shares.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/shares", list_id),
            serde_json::json!({"user_id": target.user_id, "permission_level": "VIEWER"}),
            &editor.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_share_level_update() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let bob = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/shares", list_id),
            serde_json::json!({"user_id": bob.user_id, "permission_level": "VIEWER"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    let share = parse_response_body(response).await;
    let share_id = share["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/shoppinglists/{}/shares/{}", list_id, share_id),
            serde_json::json!({"permission_level": "EDITOR"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["permission_level"].as_str().unwrap(), "EDITOR");

    // Bob can now add items.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/items", list_id),
            serde_json::json!({"product_name": "Cheese", "quantity": 1.0}),
            &bob.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
