//! Repository for invitation database operations.

use chrono::{DateTime, Duration, Utc};
use domain::models::invitation::INVITATION_TTL_DAYS;
use domain::models::{InvitationStatus, PermissionLevel};
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InvitationEntity, ListShareEntity};

const INVITATION_COLUMNS: &str =
    "id, shopping_list_id, sender_id, recipient_email, recipient_user_id, \
     invitation_code, status, sent_at, expires_at, accepted_at";

/// Repository for invitation operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a PENDING invitation.
    pub async fn create(
        &self,
        shopping_list_id: Uuid,
        sender_id: Uuid,
        recipient_email: &str,
        recipient_user_id: Option<Uuid>,
        invitation_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<InvitationEntity, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO invitations
                (shopping_list_id, sender_id, recipient_email, recipient_user_id,
                 invitation_code, status, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {INVITATION_COLUMNS}
            "#
        );
        sqlx::query_as::<_, InvitationEntity>(&query)
            .bind(shopping_list_id)
            .bind(sender_id)
            .bind(recipient_email)
            .bind(recipient_user_id)
            .bind(invitation_code)
            .bind(InvitationStatus::Pending.as_str())
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await
    }

    /// Finds an invitation by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InvitationEntity>, sqlx::Error> {
        let query = format!("SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = $1");
        sqlx::query_as::<_, InvitationEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Finds an invitation by its code.
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        let query =
            format!("SELECT {INVITATION_COLUMNS} FROM invitations WHERE invitation_code = $1");
        sqlx::query_as::<_, InvitationEntity>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists PENDING invitations addressed to an email (case-insensitive).
    ///
    /// There is no compound (email, list) lookup; duplicate-prevention
    /// scans this result and filters by list id.
    pub async fn list_pending_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<InvitationEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations \
             WHERE LOWER(recipient_email) = LOWER($1) AND status = $2"
        );
        sqlx::query_as::<_, InvitationEntity>(&query)
            .bind(email)
            .bind(InvitationStatus::Pending.as_str())
            .fetch_all(&self.pool)
            .await
    }

    /// Lists PENDING invitations linked to a registered recipient.
    ///
    /// Email-only invitations stay invisible here until recipient_user_id
    /// is populated.
    pub async fn list_pending_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvitationEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations \
             WHERE recipient_user_id = $1 AND status = $2 \
             ORDER BY sent_at DESC"
        );
        sqlx::query_as::<_, InvitationEntity>(&query)
            .bind(user_id)
            .bind(InvitationStatus::Pending.as_str())
            .fetch_all(&self.pool)
            .await
    }

    /// Accepts a PENDING invitation and creates the recipient's share, in
    /// one transaction.
    ///
    /// The UPDATE is guarded on PENDING status, so of two racing accepts
    /// only one commits past the guard and creates a share; the other
    /// observes `None`.
    pub async fn accept_pending(
        &self,
        id: Uuid,
        accepting_user_id: Uuid,
        level: PermissionLevel,
    ) -> Result<Option<(InvitationEntity, ListShareEntity)>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let update = format!(
            r#"
            UPDATE invitations
            SET status = $3, accepted_at = NOW(), recipient_user_id = $2
            WHERE id = $1 AND status = $4
            RETURNING {INVITATION_COLUMNS}
            "#
        );
        let invitation = sqlx::query_as::<_, InvitationEntity>(&update)
            .bind(id)
            .bind(accepting_user_id)
            .bind(InvitationStatus::Accepted.as_str())
            .bind(InvitationStatus::Pending.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(invitation) = invitation else {
            tx.rollback().await?;
            return Ok(None);
        };

        let share = sqlx::query_as::<_, ListShareEntity>(
            r#"
            INSERT INTO list_shares (shopping_list_id, shared_user_id, permission_level)
            VALUES ($1, $2, $3)
            RETURNING id, shopping_list_id, shared_user_id, permission_level, shared_at
            "#,
        )
        .bind(invitation.shopping_list_id)
        .bind(accepting_user_id)
        .bind(level.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some((invitation, share)))
    }

    /// Transitions a PENDING invitation to REJECTED.
    ///
    /// Returns the updated entity, or `None` when the invitation was not
    /// PENDING (or does not exist).
    pub async fn reject_pending(
        &self,
        id: Uuid,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        self.transition_pending(id, InvitationStatus::Rejected).await
    }

    /// Transitions a PENDING invitation to EXPIRED.
    ///
    /// Called lazily when an accept or reject attempt observes that the
    /// expiry moment has passed; there is no background sweep.
    pub async fn mark_expired(&self, id: Uuid) -> Result<Option<InvitationEntity>, sqlx::Error> {
        self.transition_pending(id, InvitationStatus::Expired).await
    }

    async fn transition_pending(
        &self,
        id: Uuid,
        to: InvitationStatus,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE invitations
            SET status = $2
            WHERE id = $1 AND status = $3
            RETURNING {INVITATION_COLUMNS}
            "#
        );
        sqlx::query_as::<_, InvitationEntity>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(InvitationStatus::Pending.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    /// Deletes an invitation. Returns true when it existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Generate an opaque invitation code.
///
/// 32 characters from a 55-symbol URL-safe alphabet (~185 bits), avoiding
/// confusable characters (0, O, 1, l, I).
pub fn generate_invitation_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
    let mut rng = rand::thread_rng();

    (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Expiry moment for a freshly sent invitation (now + 7 days).
pub fn invitation_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::days(INVITATION_TTL_DAYS)
}
