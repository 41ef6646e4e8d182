//! Integration tests for shopping list management.
//!
//! Requires a PostgreSQL test database; run with `cargo test -- --ignored`.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_list_bootstraps_owner_admin_share() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    // The owner's explicit ADMIN share is visible in the roster.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/shoppinglists/{}/shares", list_id),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let shares = parse_response_body(response).await;
    let shares = shares.as_array().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0]["shared_user_id"].as_str().unwrap(), alice.user_id);
    assert_eq!(shares[0]["permission_level"].as_str().unwrap(), "ADMIN");

    // getAccessibleLists includes the new list.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            "/api/shoppinglists",
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let lists = parse_response_body(response).await;
    assert!(lists
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["id"].as_str().unwrap() == list_id));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_list_requires_view_access() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let carol = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Private").await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/shoppinglists/{}", list_id),
            &carol.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/shoppinglists/{}", list_id),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_update_list_partial_semantics() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    // Rename without touching description; archived omitted -> false.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/shoppinglists/{}", list_id),
            serde_json::json!({"name": "Weekly groceries"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"].as_str().unwrap(), "Weekly groceries");
    assert!(!body["archived"].as_bool().unwrap());

    // Archive; name keeps its value.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/shoppinglists/{}", list_id),
            serde_json::json!({"archived": true}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["name"].as_str().unwrap(), "Weekly groceries");
    assert!(body["archived"].as_bool().unwrap());

    // An update omitting archived always un-archives: the flag has no
    // absent representation.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/shoppinglists/{}", list_id),
            serde_json::json!({"description": "food only"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert!(!body["archived"].as_bool().unwrap());
    assert_eq!(body["description"].as_str().unwrap(), "food only");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_update_list_requires_admin() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let carol = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Groceries").await;

    // Grant Carol EDITOR: still not enough for list updates.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/shares", list_id),
            serde_json::json!({"user_id": carol.user_id, "permission_level": "EDITOR"}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/shoppinglists/{}", list_id),
            serde_json::json!({"name": "Hijacked"}),
            &carol.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_list_cascades_items_and_shares() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let alice = create_authenticated_user(&app, &TestUser::new()).await;
    let list_id = create_test_list(&app, &alice, "Doomed").await;

    // Add an item so the cascade has something to remove.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/shoppinglists/{}/items", list_id),
            serde_json::json!({"product_name": "Milk", "quantity": 1.0}),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/shoppinglists/{}", list_id),
            &alice.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // No orphaned rows survive.
    let list_uuid = uuid::Uuid::parse_str(&list_id).unwrap();
    let items: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM list_items WHERE shopping_list_id = $1")
            .bind(list_uuid)
            .fetch_one(&pool)
            .await
            .unwrap();
    let shares: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM list_shares WHERE shopping_list_id = $1")
            .bind(list_uuid)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(items, 0);
    assert_eq!(shares, 0);
}
