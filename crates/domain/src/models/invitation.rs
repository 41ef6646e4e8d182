//! Invitation domain models.
//!
//! An invitation is a code-keyed, time-limited offer to become a list
//! collaborator. It is the only path that creates a share outside of an
//! explicit share grant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::list_share::PermissionLevel;

/// Days until a freshly sent invitation expires.
pub const INVITATION_TTL_DAYS: i64 = 7;

/// Invitation lifecycle status.
///
/// `Pending` is the only non-terminal state; `Accepted`, `Rejected` and
/// `Expired` permit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl InvitationStatus {
    /// Stable string form, also used as the database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Whether this status permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "EXPIRED" => Ok(Self::Expired),
            other => Err(format!("Unknown invitation status: {}", other)),
        }
    }
}

/// Invitation domain model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Invitation {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_email: String,
    /// Linked when the email resolves to a registered user (at send time
    /// or, at the latest, on acceptance).
    pub recipient_user_id: Option<Uuid>,
    pub invitation_code: String,
    pub status: InvitationStatus,
    pub sent_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

/// Request to send an invitation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendInvitationRequest {
    pub shopping_list_id: Uuid,

    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub recipient_email: String,

    /// Requested level for the future collaborator. Currently recorded
    /// nowhere: acceptance always grants EDITOR.
    pub permission_level: Option<PermissionLevel>,
}

/// Invitation representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationResponse {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_user_id: Option<Uuid>,
    pub invitation_code: String,
    pub status: InvitationStatus,
    pub sent_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id,
            shopping_list_id: invitation.shopping_list_id,
            sender_id: invitation.sender_id,
            recipient_email: invitation.recipient_email,
            recipient_user_id: invitation.recipient_user_id,
            invitation_code: invitation.invitation_code,
            status: invitation.status,
            sent_at: invitation.sent_at,
            expires_at: invitation.expires_at,
            accepted_at: invitation.accepted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Rejected,
            InvitationStatus::Expired,
        ] {
            assert_eq!(status.as_str().parse::<InvitationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_terminality() {
        assert!(!InvitationStatus::Pending.is_terminal());
        assert!(InvitationStatus::Accepted.is_terminal());
        assert!(InvitationStatus::Rejected.is_terminal());
        assert!(InvitationStatus::Expired.is_terminal());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        let parsed: InvitationStatus = serde_json::from_str("\"EXPIRED\"").unwrap();
        assert_eq!(parsed, InvitationStatus::Expired);
    }

    #[test]
    fn test_send_request_validation() {
        let valid = SendInvitationRequest {
            shopping_list_id: Uuid::new_v4(),
            recipient_email: "bob@example.com".to_string(),
            permission_level: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = SendInvitationRequest {
            shopping_list_id: Uuid::new_v4(),
            recipient_email: "not-an-email".to_string(),
            permission_level: Some(PermissionLevel::Viewer),
        };
        assert!(invalid.validate().is_err());
    }
}
