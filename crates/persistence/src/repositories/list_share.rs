//! Repository for list share database operations.

use domain::models::PermissionLevel;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ListShareEntity;

const SHARE_COLUMNS: &str =
    "id, shopping_list_id, shared_user_id, permission_level, shared_at";

/// Repository for list share operations.
#[derive(Clone)]
pub struct ListShareRepository {
    pool: PgPool,
}

impl ListShareRepository {
    /// Creates a new list share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all shares of a shopping list.
    pub async fn list_by_list(
        &self,
        shopping_list_id: Uuid,
    ) -> Result<Vec<ListShareEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {SHARE_COLUMNS} FROM list_shares WHERE shopping_list_id = $1 \
             ORDER BY shared_at"
        );
        sqlx::query_as::<_, ListShareEntity>(&query)
            .bind(shopping_list_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Finds a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ListShareEntity>, sqlx::Error> {
        let query = format!("SELECT {SHARE_COLUMNS} FROM list_shares WHERE id = $1");
        sqlx::query_as::<_, ListShareEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Finds the share for a (list, user) pair, of which at most one exists.
    pub async fn find_by_list_and_user(
        &self,
        shopping_list_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ListShareEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {SHARE_COLUMNS} FROM list_shares \
             WHERE shopping_list_id = $1 AND shared_user_id = $2"
        );
        sqlx::query_as::<_, ListShareEntity>(&query)
            .bind(shopping_list_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a new share with shared_at = now.
    ///
    /// The unique (list, user) constraint backs up the caller-side
    /// duplicate check.
    pub async fn create(
        &self,
        shopping_list_id: Uuid,
        user_id: Uuid,
        level: PermissionLevel,
    ) -> Result<ListShareEntity, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO list_shares (shopping_list_id, shared_user_id, permission_level)
            VALUES ($1, $2, $3)
            RETURNING {SHARE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ListShareEntity>(&query)
            .bind(shopping_list_id)
            .bind(user_id)
            .bind(level.as_str())
            .fetch_one(&self.pool)
            .await
    }

    /// Overwrites a share's permission level.
    ///
    /// Returns the updated entity, or `None` when the share does not exist.
    pub async fn update_level(
        &self,
        id: Uuid,
        level: PermissionLevel,
    ) -> Result<Option<ListShareEntity>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE list_shares
            SET permission_level = $2
            WHERE id = $1
            RETURNING {SHARE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ListShareEntity>(&query)
            .bind(id)
            .bind(level.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    /// Deletes a share. Returns true when it existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
