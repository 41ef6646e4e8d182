//! List item routes, scoped under a shopping list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::list_item::{
    purchase_transition, CreateListItemRequest, ListItemResponse, UpdateListItemRequest,
};
use persistence::entities::ListItemEntity;
use persistence::repositories::{ListItemRepository, ListItemUpdate};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::access;

/// List all items of a shopping list.
///
/// GET /api/shoppinglists/:id/items
///
/// Requires at least VIEWER access.
pub async fn list_items(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<ListItemResponse>>, ApiError> {
    access::require_view(&state.pool, list_id, auth.user_id).await?;

    let items = ListItemRepository::new(state.pool.clone())
        .list_by_list(list_id)
        .await?;

    Ok(Json(
        items
            .into_iter()
            .map(|i| domain::models::ListItem::from(i).into())
            .collect(),
    ))
}

/// Get a single item.
///
/// GET /api/shoppinglists/:id/items/:item_id
///
/// Requires at least VIEWER access.
pub async fn get_item(
    State(state): State<AppState>,
    auth: UserAuth,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ListItemResponse>, ApiError> {
    let item = find_item_in_list(&state, list_id, item_id).await?;
    access::require_view(&state.pool, list_id, auth.user_id).await?;

    Ok(Json(domain::models::ListItem::from(item).into()))
}

/// Add an item to a shopping list.
///
/// POST /api/shoppinglists/:id/items
///
/// Requires EDITOR access. `added_by` is stamped from the requester;
/// `purchased` always starts false with no purchaser.
pub async fn add_item(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
    Json(request): Json<CreateListItemRequest>,
) -> Result<(StatusCode, Json<ListItemResponse>), ApiError> {
    request.validate()?;

    access::require_edit(&state.pool, list_id, auth.user_id).await?;

    let item = ListItemRepository::new(state.pool.clone())
        .create(
            list_id,
            &request.product_name,
            request.quantity,
            request.unit.as_deref(),
            request.notes.as_deref(),
            request.priority,
            auth.user_id,
        )
        .await?;

    info!(
        item_id = %item.id,
        list_id = %list_id,
        user_id = %auth.user_id,
        product_name = %item.product_name,
        "List item added"
    );

    Ok((
        StatusCode::CREATED,
        Json(domain::models::ListItem::from(item).into()),
    ))
}

/// Update an item.
///
/// PUT /api/shoppinglists/:id/items/:item_id
///
/// Requires EDITOR access on the item's list. Scalar fields are partial;
/// the `purchased` flag only acts when it differs from the current value
/// (transition to true records the requester as purchaser, transition to
/// false clears it).
pub async fn update_item(
    State(state): State<AppState>,
    auth: UserAuth,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateListItemRequest>,
) -> Result<Json<ListItemResponse>, ApiError> {
    request.validate()?;

    let item = find_item_in_list(&state, list_id, item_id).await?;
    access::require_edit(&state.pool, item.shopping_list_id, auth.user_id).await?;

    let (purchased, purchased_by) = purchase_transition(
        item.purchased,
        item.purchased_by,
        request.purchased,
        auth.user_id,
    );

    let updated = ListItemRepository::new(state.pool.clone())
        .update(
            item_id,
            ListItemUpdate {
                product_name: request.product_name.as_deref(),
                quantity: request.quantity,
                unit: request.unit.as_deref(),
                notes: request.notes.as_deref(),
                priority: request.priority,
                purchased,
                purchased_by,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("List item not found".to_string()))?;

    info!(
        item_id = %item_id,
        list_id = %list_id,
        user_id = %auth.user_id,
        purchased = updated.purchased,
        "List item updated"
    );

    Ok(Json(domain::models::ListItem::from(updated).into()))
}

/// Delete an item.
///
/// DELETE /api/shoppinglists/:id/items/:item_id
///
/// Requires EDITOR access on the item's list.
pub async fn delete_item(
    State(state): State<AppState>,
    auth: UserAuth,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let item = find_item_in_list(&state, list_id, item_id).await?;
    access::require_edit(&state.pool, item.shopping_list_id, auth.user_id).await?;

    let deleted = ListItemRepository::new(state.pool.clone())
        .delete(item_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("List item not found".to_string()));
    }

    info!(item_id = %item_id, list_id = %list_id, user_id = %auth.user_id, "List item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Loads an item and verifies it belongs to the list named in the path.
async fn find_item_in_list(
    state: &AppState,
    list_id: Uuid,
    item_id: Uuid,
) -> Result<ListItemEntity, ApiError> {
    let item = ListItemRepository::new(state.pool.clone())
        .find_by_id(item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List item not found".to_string()))?;

    if item.shopping_list_id != list_id {
        return Err(ApiError::NotFound("List item not found".to_string()));
    }

    Ok(item)
}
