//! List access resolution glue.
//!
//! Every route that touches a list, its items, shares or invitations calls
//! through here. The decision itself lives in
//! [`domain::services::access::effective_level`]; this module only loads
//! the list and the caller's share row and enforces the outcome, so the
//! permission rules exist in exactly one place.

use domain::services::access::{effective_level, AccessLevel};
use persistence::entities::ShoppingListEntity;
use persistence::repositories::{ListShareRepository, ShoppingListRepository};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// A resolved list together with the caller's effective access level.
#[derive(Debug, Clone)]
pub struct ListAccess {
    pub list: ShoppingListEntity,
    pub level: AccessLevel,
}

/// Loads a list and computes the caller's effective access level.
///
/// Fails with NotFound when the list does not exist. Never fails on
/// missing access - callers gate on `level` (or use the `require_*`
/// helpers).
pub async fn resolve_list_access(
    pool: &PgPool,
    shopping_list_id: Uuid,
    user_id: Uuid,
) -> Result<ListAccess, ApiError> {
    let list = ShoppingListRepository::new(pool.clone())
        .find_by_id(shopping_list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Shopping list not found".to_string()))?;

    let level = level_for(pool, &list, user_id).await?;

    Ok(ListAccess { list, level })
}

/// Computes the caller's effective access level on an already-loaded list.
pub async fn level_for(
    pool: &PgPool,
    list: &ShoppingListEntity,
    user_id: Uuid,
) -> Result<AccessLevel, ApiError> {
    let share = ListShareRepository::new(pool.clone())
        .find_by_list_and_user(list.id, user_id)
        .await?;

    Ok(effective_level(
        list.owner_id,
        share.map(|s| s.level()),
        user_id,
    ))
}

/// Resolves the list and requires at least VIEWER access.
pub async fn require_view(
    pool: &PgPool,
    shopping_list_id: Uuid,
    user_id: Uuid,
) -> Result<ListAccess, ApiError> {
    let access = resolve_list_access(pool, shopping_list_id, user_id).await?;
    if !access.level.can_view() {
        return Err(ApiError::Forbidden(
            "You do not have permission to view this shopping list".to_string(),
        ));
    }
    Ok(access)
}

/// Resolves the list and requires at least EDITOR access.
pub async fn require_edit(
    pool: &PgPool,
    shopping_list_id: Uuid,
    user_id: Uuid,
) -> Result<ListAccess, ApiError> {
    let access = resolve_list_access(pool, shopping_list_id, user_id).await?;
    if !access.level.can_edit() {
        return Err(ApiError::Forbidden(
            "You do not have permission to edit this shopping list".to_string(),
        ));
    }
    Ok(access)
}

/// Resolves the list and requires ADMIN access.
pub async fn require_admin(
    pool: &PgPool,
    shopping_list_id: Uuid,
    user_id: Uuid,
) -> Result<ListAccess, ApiError> {
    let access = resolve_list_access(pool, shopping_list_id, user_id).await?;
    if !access.level.can_admin() {
        return Err(ApiError::Forbidden(
            "You do not have permission to manage this shopping list".to_string(),
        ));
    }
    Ok(access)
}
