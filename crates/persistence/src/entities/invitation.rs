//! Invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::InvitationStatus;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the invitations table.
///
/// `status` is stored as text ("PENDING" | "ACCEPTED" | "REJECTED" |
/// "EXPIRED").
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_email: String,
    pub recipient_user_id: Option<Uuid>,
    pub invitation_code: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl InvitationEntity {
    /// Parses the stored status.
    ///
    /// Unknown values degrade to Expired, which is terminal and inert.
    pub fn parsed_status(&self) -> InvitationStatus {
        InvitationStatus::from_str(&self.status).unwrap_or(InvitationStatus::Expired)
    }

    /// Whether this invitation is still awaiting a response.
    pub fn is_pending(&self) -> bool {
        self.parsed_status() == InvitationStatus::Pending
    }

    /// Whether the expiry moment has passed.
    ///
    /// A pending-but-expired invitation is only transitioned lazily when an
    /// accept or reject attempt observes the expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Whether the given email address is the invitation's addressee.
    pub fn addressed_to(&self, email: &str) -> bool {
        self.recipient_email.eq_ignore_ascii_case(email)
    }
}

impl From<InvitationEntity> for domain::models::Invitation {
    fn from(entity: InvitationEntity) -> Self {
        let status = entity.parsed_status();
        Self {
            id: entity.id,
            shopping_list_id: entity.shopping_list_id,
            sender_id: entity.sender_id,
            recipient_email: entity.recipient_email,
            recipient_user_id: entity.recipient_user_id,
            invitation_code: entity.invitation_code,
            status,
            sent_at: entity.sent_at,
            expires_at: entity.expires_at,
            accepted_at: entity.accepted_at,
        }
    }
}
