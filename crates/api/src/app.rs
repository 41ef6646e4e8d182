use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{auth, health, invitations, list_items, list_shares, shopping_lists, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    // Authenticated routes; the UserAuth extractor rejects requests
    // without a valid Bearer token.
    let authenticated_routes = Router::new()
        // Current user
        .route("/api/users/me", get(users::me).put(users::update_me))
        // Shopping lists
        .route(
            "/api/shoppinglists",
            get(shopping_lists::list_accessible).post(shopping_lists::create_list),
        )
        .route(
            "/api/shoppinglists/:id",
            get(shopping_lists::get_list)
                .put(shopping_lists::update_list)
                .delete(shopping_lists::delete_list),
        )
        // List items
        .route(
            "/api/shoppinglists/:id/items",
            get(list_items::list_items).post(list_items::add_item),
        )
        .route(
            "/api/shoppinglists/:id/items/:item_id",
            get(list_items::get_item)
                .put(list_items::update_item)
                .delete(list_items::delete_item),
        )
        // List shares
        .route(
            "/api/shoppinglists/:id/shares",
            get(list_shares::list_shares).post(list_shares::create_share),
        )
        .route(
            "/api/shoppinglists/:id/shares/:share_id",
            axum::routing::put(list_shares::update_share).delete(list_shares::delete_share),
        )
        // Invitations
        .route("/api/invitations/send", post(invitations::send_invitation))
        .route(
            "/api/invitations/accept/:code",
            post(invitations::accept_invitation),
        )
        .route(
            "/api/invitations/reject/:code",
            post(invitations::reject_invitation),
        )
        .route(
            "/api/invitations/pending",
            get(invitations::pending_invitations),
        )
        .route(
            "/api/invitations/:id",
            delete(invitations::delete_invitation),
        );

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
