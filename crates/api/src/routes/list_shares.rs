//! List share routes, scoped under a shopping list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::list_share::{
    CreateListShareRequest, ListShareResponse, UpdateListShareRequest,
};
use persistence::entities::ListShareEntity;
use persistence::repositories::{ListShareRepository, UserRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::access;

/// List the shares of a shopping list.
///
/// GET /api/shoppinglists/:id/shares
///
/// Requires at least VIEWER access: every collaborator can see the roster
/// (which includes the owner's bootstrap ADMIN share).
pub async fn list_shares(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<ListShareResponse>>, ApiError> {
    access::require_view(&state.pool, list_id, auth.user_id).await?;

    let shares = ListShareRepository::new(state.pool.clone())
        .list_by_list(list_id)
        .await?;

    Ok(Json(
        shares
            .into_iter()
            .map(|s| domain::models::ListShare::from(s).into())
            .collect(),
    ))
}

/// Share a list with a user.
///
/// POST /api/shoppinglists/:id/shares
///
/// Requires ADMIN access. The owner cannot be shared explicitly (the
/// ownership rule already grants ADMIN), and a user can hold at most one
/// share per list.
pub async fn create_share(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(list_id): Path<Uuid>,
    Json(request): Json<CreateListShareRequest>,
) -> Result<(StatusCode, Json<ListShareResponse>), ApiError> {
    let list_access = access::require_admin(&state.pool, list_id, auth.user_id).await?;

    UserRepository::new(state.pool.clone())
        .find_by_id(request.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Shared user not found".to_string()))?;

    if list_access.list.owner_id == request.user_id {
        return Err(ApiError::Validation(
            "Owner cannot be shared explicitly; the owner already has ADMIN access".to_string(),
        ));
    }

    let share_repo = ListShareRepository::new(state.pool.clone());

    if share_repo
        .find_by_list_and_user(list_id, request.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "List is already shared with this user".to_string(),
        ));
    }

    let share = share_repo
        .create(list_id, request.user_id, request.permission_level)
        .await?;

    info!(
        share_id = %share.id,
        list_id = %list_id,
        shared_user_id = %request.user_id,
        permission_level = %request.permission_level,
        granted_by = %auth.user_id,
        "List share created"
    );

    Ok((
        StatusCode::CREATED,
        Json(domain::models::ListShare::from(share).into()),
    ))
}

/// Change a share's permission level.
///
/// PUT /api/shoppinglists/:id/shares/:share_id
///
/// Requires ADMIN access.
pub async fn update_share(
    State(state): State<AppState>,
    auth: UserAuth,
    Path((list_id, share_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateListShareRequest>,
) -> Result<Json<ListShareResponse>, ApiError> {
    find_share_in_list(&state, list_id, share_id).await?;
    access::require_admin(&state.pool, list_id, auth.user_id).await?;

    let updated = ListShareRepository::new(state.pool.clone())
        .update_level(share_id, request.permission_level)
        .await?
        .ok_or_else(|| ApiError::NotFound("List share not found".to_string()))?;

    info!(
        share_id = %share_id,
        list_id = %list_id,
        permission_level = %request.permission_level,
        updated_by = %auth.user_id,
        "List share updated"
    );

    Ok(Json(domain::models::ListShare::from(updated).into()))
}

/// Revoke a share.
///
/// DELETE /api/shoppinglists/:id/shares/:share_id
///
/// Requires ADMIN access. The owner's bootstrap share cannot be deleted,
/// not even by another ADMIN.
pub async fn delete_share(
    State(state): State<AppState>,
    auth: UserAuth,
    Path((list_id, share_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let share = find_share_in_list(&state, list_id, share_id).await?;
    let list_access = access::require_admin(&state.pool, list_id, auth.user_id).await?;

    if share.shared_user_id == list_access.list.owner_id {
        return Err(ApiError::Validation(
            "Cannot delete the owner's share of the list".to_string(),
        ));
    }

    let deleted = ListShareRepository::new(state.pool.clone())
        .delete(share_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("List share not found".to_string()));
    }

    info!(
        share_id = %share_id,
        list_id = %list_id,
        revoked_by = %auth.user_id,
        "List share deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Loads a share and verifies it belongs to the list named in the path.
async fn find_share_in_list(
    state: &AppState,
    list_id: Uuid,
    share_id: Uuid,
) -> Result<ListShareEntity, ApiError> {
    let share = ListShareRepository::new(state.pool.clone())
        .find_by_id(share_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List share not found".to_string()))?;

    if share.shopping_list_id != list_id {
        return Err(ApiError::NotFound("List share not found".to_string()));
    }

    Ok(share)
}
