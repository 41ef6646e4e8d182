//! Repository for shopping list database operations.

use domain::models::PermissionLevel;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ShoppingListEntity;

/// Partial list update. `name`/`description` keep their stored value when
/// `None`; `archived` is always written.
#[derive(Debug, Clone)]
pub struct ShoppingListUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub archived: bool,
}

/// Repository for shopping list operations.
#[derive(Clone)]
pub struct ShoppingListRepository {
    pool: PgPool,
}

impl ShoppingListRepository {
    /// Creates a new shopping list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a list and the owner's explicit ADMIN share in one
    /// transaction.
    ///
    /// The owner is ADMIN by the ownership rule alone; the explicit share
    /// row exists so the list's collaborator roster is complete for
    /// clients.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        owner_id: Uuid,
    ) -> Result<ShoppingListEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let list = sqlx::query_as::<_, ShoppingListEntity>(
            r#"
            INSERT INTO shopping_lists (name, description, owner_id, archived)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, name, description, owner_id, archived, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO list_shares (shopping_list_id, shared_user_id, permission_level)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(list.id)
        .bind(owner_id)
        .bind(PermissionLevel::Admin.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(list)
    }

    /// Finds a list by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ShoppingListEntity>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingListEntity>(
            r#"
            SELECT id, name, description, owner_id, archived, created_at, updated_at
            FROM shopping_lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists every list the user owns or is shared into, deduplicated.
    ///
    /// No ordering is guaranteed beyond the creation-time sort applied
    /// here for stable client display.
    pub async fn find_accessible(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListEntity>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingListEntity>(
            r#"
            SELECT DISTINCT l.id, l.name, l.description, l.owner_id, l.archived,
                   l.created_at, l.updated_at
            FROM shopping_lists l
            LEFT JOIN list_shares s ON s.shopping_list_id = l.id
            WHERE l.owner_id = $1 OR s.shared_user_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Applies a partial update and refreshes updated_at.
    ///
    /// Returns the updated entity, or `None` when the list does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: ShoppingListUpdate<'_>,
    ) -> Result<Option<ShoppingListEntity>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingListEntity>(
            r#"
            UPDATE shopping_lists
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                archived = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, owner_id, archived, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.description)
        .bind(update.archived)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes a list together with its items and shares.
    ///
    /// The three deletes run in one transaction so no orphaned rows survive
    /// a partial failure. Returns true when the list existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM list_items WHERE shopping_list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM list_shares WHERE shopping_list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM invitations WHERE shopping_list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM shopping_lists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
