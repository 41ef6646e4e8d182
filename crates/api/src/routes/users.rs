//! User profile routes.

use axum::{extract::State, Json};
use domain::models::user::{UpdateUserRequest, UserResponse};
use persistence::repositories::{UserRepository, UserUpdate};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Get the current user's profile.
///
/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(domain::models::User::from(user).into()))
}

/// Update the current user's profile.
///
/// PUT /api/users/me
///
/// Partial update: absent fields keep their value. Username and email
/// changes re-check uniqueness.
pub async fn update_me(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    let current = repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Some(ref email) = request.email {
        if !current.email_matches(email) && repo.email_exists(email).await? {
            return Err(ApiError::Conflict(format!(
                "Email already registered: {}",
                email
            )));
        }
    }

    if let Some(ref username) = request.username {
        if username != &current.username && repo.username_exists(username).await? {
            return Err(ApiError::Conflict(format!(
                "Username already taken: {}",
                username
            )));
        }
    }

    let updated = repo
        .update(
            auth.user_id,
            UserUpdate {
                username: request.username.as_deref(),
                email: request.email.as_deref(),
                first_name: request.first_name.as_deref(),
                last_name: request.last_name.as_deref(),
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(user_id = %auth.user_id, "User profile updated");

    Ok(Json(domain::models::User::from(updated).into()))
}
