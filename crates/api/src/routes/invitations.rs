//! Invitation routes.
//!
//! Invitations move PENDING -> ACCEPTED | REJECTED | EXPIRED; the three
//! terminal states permit no further transitions. Accepting is the one
//! operation in the service that creates a list share as a side effect of
//! another lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::invitation::{InvitationResponse, SendInvitationRequest};
use domain::models::PermissionLevel;
use persistence::repositories::{
    generate_invitation_code, invitation_expiry, InvitationRepository, UserRepository,
};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::access;

/// Send an invitation to an email address.
///
/// POST /api/invitations/send
///
/// Requires ADMIN access on the list. The requested permission level is
/// accepted for forward compatibility but not stored: acceptance always
/// grants EDITOR.
pub async fn send_invitation(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<SendInvitationRequest>,
) -> Result<(StatusCode, Json<InvitationResponse>), ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    let invitation_repo = InvitationRepository::new(state.pool.clone());

    // Sender must resolve; the token may outlive the account.
    user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sender user not found".to_string()))?;

    let list_access =
        access::require_admin(&state.pool, request.shopping_list_id, auth.user_id).await?;

    // If the recipient is already registered, reject when they can already
    // reach the list.
    let recipient = user_repo.find_by_email(&request.recipient_email).await?;
    if let Some(ref recipient) = recipient {
        let level = access::level_for(&state.pool, &list_access.list, recipient.id).await?;
        if level.can_view() {
            return Err(ApiError::Validation(format!(
                "User {} already has access to this list",
                request.recipient_email
            )));
        }
    }

    // One pending invitation per (email, list). There is no compound
    // lookup; scan the recipient's pending invitations and filter.
    let pending = invitation_repo
        .list_pending_by_email(&request.recipient_email)
        .await?;
    if pending
        .iter()
        .any(|inv| inv.shopping_list_id == request.shopping_list_id)
    {
        return Err(ApiError::Validation(
            "Pending invitation already exists for this email and list".to_string(),
        ));
    }

    let code = generate_invitation_code();
    let invitation = invitation_repo
        .create(
            request.shopping_list_id,
            auth.user_id,
            &request.recipient_email,
            recipient.map(|r| r.id),
            &code,
            invitation_expiry(),
        )
        .await?;

    info!(
        invitation_id = %invitation.id,
        list_id = %request.shopping_list_id,
        sender_id = %auth.user_id,
        recipient_email = %request.recipient_email,
        requested_level = ?request.permission_level,
        "Invitation sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(domain::models::Invitation::from(invitation).into()),
    ))
}

/// Accept an invitation by code.
///
/// POST /api/invitations/accept/:code
///
/// On success the caller receives an EDITOR share and the invitation
/// becomes ACCEPTED. An expired invitation is transitioned to EXPIRED as a
/// side effect of the failed attempt; there is no background sweep.
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(code): Path<String>,
) -> Result<Json<InvitationResponse>, ApiError> {
    let invitation_repo = InvitationRepository::new(state.pool.clone());

    let invitation = invitation_repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid invitation code".to_string()))?;

    if !invitation.is_pending() {
        return Err(ApiError::Validation(
            "Invitation is not in PENDING status".to_string(),
        ));
    }

    if invitation.is_expired() {
        invitation_repo.mark_expired(invitation.id).await?;
        warn!(
            invitation_id = %invitation.id,
            user_id = %auth.user_id,
            "Accept attempt on expired invitation"
        );
        return Err(ApiError::Validation("Invitation has expired".to_string()));
    }

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Accepting user not found".to_string()))?;

    if !invitation.addressed_to(&user.email) {
        return Err(ApiError::Forbidden(
            "Invitation is not intended for this user's email address".to_string(),
        ));
    }

    // A recipient who gained access through another path in the meantime
    // cannot accept; the invitation is closed out as REJECTED.
    let list_access =
        access::resolve_list_access(&state.pool, invitation.shopping_list_id, auth.user_id)
            .await?;
    if list_access.level.can_view() {
        invitation_repo.reject_pending(invitation.id).await?;
        return Err(ApiError::Validation(format!(
            "User {} already has access to this list",
            user.email
        )));
    }

    // Status-guarded transition: of two racing accepts only one commits
    // and creates the share.
    let (accepted, share) = invitation_repo
        .accept_pending(invitation.id, auth.user_id, PermissionLevel::Editor)
        .await?
        .ok_or_else(|| ApiError::Conflict("Invitation is no longer pending".to_string()))?;

    info!(
        invitation_id = %accepted.id,
        list_id = %accepted.shopping_list_id,
        user_id = %auth.user_id,
        share_id = %share.id,
        "Invitation accepted"
    );

    Ok(Json(domain::models::Invitation::from(accepted).into()))
}

/// Reject an invitation by code.
///
/// POST /api/invitations/reject/:code
///
/// Same addressing rules as accept; no share side effects.
pub async fn reject_invitation(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(code): Path<String>,
) -> Result<Json<InvitationResponse>, ApiError> {
    let invitation_repo = InvitationRepository::new(state.pool.clone());

    let invitation = invitation_repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid invitation code".to_string()))?;

    if !invitation.is_pending() {
        return Err(ApiError::Validation(
            "Invitation is not in PENDING status".to_string(),
        ));
    }

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Rejecting user not found".to_string()))?;

    if !invitation.addressed_to(&user.email) {
        return Err(ApiError::Forbidden(
            "Invitation is not intended for this user's email address".to_string(),
        ));
    }

    let rejected = invitation_repo
        .reject_pending(invitation.id)
        .await?
        .ok_or_else(|| ApiError::Conflict("Invitation is no longer pending".to_string()))?;

    info!(
        invitation_id = %rejected.id,
        user_id = %auth.user_id,
        "Invitation rejected"
    );

    Ok(Json(domain::models::Invitation::from(rejected).into()))
}

/// List the caller's pending invitations.
///
/// GET /api/invitations/pending
///
/// Only invitations already linked to the caller's account are visible;
/// email-only invitations surface once the recipient is linked.
pub async fn pending_invitations(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<InvitationResponse>>, ApiError> {
    let invitations = InvitationRepository::new(state.pool.clone())
        .list_pending_for_user(auth.user_id)
        .await?;

    Ok(Json(
        invitations
            .into_iter()
            .map(|i| domain::models::Invitation::from(i).into())
            .collect(),
    ))
}

/// Delete an invitation.
///
/// DELETE /api/invitations/:id
///
/// Permitted for the original sender or any ADMIN of the list.
pub async fn delete_invitation(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(invitation_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let invitation_repo = InvitationRepository::new(state.pool.clone());

    let invitation = invitation_repo
        .find_by_id(invitation_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    if invitation.sender_id != auth.user_id {
        let list_access =
            access::resolve_list_access(&state.pool, invitation.shopping_list_id, auth.user_id)
                .await?;
        if !list_access.level.can_admin() {
            return Err(ApiError::Forbidden(
                "You do not have permission to delete this invitation".to_string(),
            ));
        }
    }

    let deleted = invitation_repo.delete(invitation_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Invitation not found".to_string()));
    }

    info!(
        invitation_id = %invitation_id,
        user_id = %auth.user_id,
        "Invitation deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
