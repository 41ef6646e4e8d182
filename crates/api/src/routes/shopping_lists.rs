//! Shopping list routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::shopping_list::{
    CreateShoppingListRequest, ShoppingListResponse, UpdateShoppingListRequest,
};
use persistence::repositories::{ShoppingListRepository, ShoppingListUpdate};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::access;

/// Create a new shopping list.
///
/// POST /api/shoppinglists
///
/// The caller becomes the owner and receives an explicit ADMIN share so
/// the list's collaborator roster is complete for clients.
pub async fn create_list(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateShoppingListRequest>,
) -> Result<(StatusCode, Json<ShoppingListResponse>), ApiError> {
    request.validate()?;

    let list = ShoppingListRepository::new(state.pool.clone())
        .create(&request.name, request.description.as_deref(), auth.user_id)
        .await
        .map_err(|e| match e {
            // Owner id is taken from the verified token; a missing row means
            // the account was deleted since.
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503") => {
                ApiError::NotFound("Owner user not found".to_string())
            }
            other => other.into(),
        })?;

    info!(
        list_id = %list.id,
        list_name = %list.name,
        owner_id = %auth.user_id,
        "Shopping list created"
    );

    Ok((
        StatusCode::CREATED,
        Json(domain::models::ShoppingList::from(list).into()),
    ))
}

/// List every shopping list the caller owns or is shared into.
///
/// GET /api/shoppinglists
pub async fn list_accessible(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<ShoppingListResponse>>, ApiError> {
    let lists = ShoppingListRepository::new(state.pool.clone())
        .find_accessible(auth.user_id)
        .await?;

    let responses: Vec<ShoppingListResponse> = lists
        .into_iter()
        .map(|l| domain::models::ShoppingList::from(l).into())
        .collect();

    info!(
        user_id = %auth.user_id,
        list_count = responses.len(),
        "Listed accessible shopping lists"
    );

    Ok(Json(responses))
}

/// Get a shopping list by ID.
///
/// GET /api/shoppinglists/:id
///
/// Requires at least VIEWER access.
pub async fn get_list(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let list_access = access::require_view(&state.pool, list_id, auth.user_id).await?;

    Ok(Json(
        domain::models::ShoppingList::from(list_access.list).into(),
    ))
}

/// Update a shopping list.
///
/// PUT /api/shoppinglists/:id
///
/// Requires ADMIN access. `name`/`description` are partial; `archived` is
/// always overwritten from the request body.
pub async fn update_list(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
    Json(request): Json<UpdateShoppingListRequest>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    request.validate()?;

    access::require_admin(&state.pool, list_id, auth.user_id).await?;

    let updated = ShoppingListRepository::new(state.pool.clone())
        .update(
            list_id,
            ShoppingListUpdate {
                name: request.name.as_deref(),
                description: request.description.as_deref(),
                archived: request.archived,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Shopping list not found".to_string()))?;

    info!(list_id = %list_id, user_id = %auth.user_id, "Shopping list updated");

    Ok(Json(domain::models::ShoppingList::from(updated).into()))
}

/// Delete a shopping list together with its items and shares.
///
/// DELETE /api/shoppinglists/:id
///
/// Requires ADMIN access.
pub async fn delete_list(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    access::require_admin(&state.pool, list_id, auth.user_id).await?;

    let deleted = ShoppingListRepository::new(state.pool.clone())
        .delete(list_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Shopping list not found".to_string()));
    }

    info!(list_id = %list_id, user_id = %auth.user_id, "Shopping list deleted");

    Ok(StatusCode::NO_CONTENT)
}
