//! Repository for list item database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ListItemEntity;

const ITEM_COLUMNS: &str = "id, shopping_list_id, product_name, quantity, unit, purchased, \
                            notes, priority, added_by, purchased_by, created_at, updated_at";

/// Resolved field values for an item update.
///
/// Scalar fields keep their stored value when `None`. `purchased` and
/// `purchased_by` are always written: the caller resolves the purchase
/// transition from the current row before calling.
#[derive(Debug, Clone)]
pub struct ListItemUpdate<'a> {
    pub product_name: Option<&'a str>,
    pub quantity: Option<f64>,
    pub unit: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub priority: Option<i32>,
    pub purchased: bool,
    pub purchased_by: Option<Uuid>,
}

/// Repository for list item operations.
#[derive(Clone)]
pub struct ListItemRepository {
    pool: PgPool,
}

impl ListItemRepository {
    /// Creates a new list item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all items of a shopping list.
    pub async fn list_by_list(
        &self,
        shopping_list_id: Uuid,
    ) -> Result<Vec<ListItemEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM list_items WHERE shopping_list_id = $1 \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, ListItemEntity>(&query)
            .bind(shopping_list_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Finds an item by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ListItemEntity>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM list_items WHERE id = $1");
        sqlx::query_as::<_, ListItemEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a new item.
    ///
    /// `purchased` starts false and `purchased_by` empty regardless of any
    /// caller input; `added_by` records the requester.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        shopping_list_id: Uuid,
        product_name: &str,
        quantity: f64,
        unit: Option<&str>,
        notes: Option<&str>,
        priority: Option<i32>,
        added_by: Uuid,
    ) -> Result<ListItemEntity, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO list_items
                (shopping_list_id, product_name, quantity, unit, notes, priority,
                 added_by, purchased, purchased_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, NULL)
            RETURNING {ITEM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ListItemEntity>(&query)
            .bind(shopping_list_id)
            .bind(product_name)
            .bind(quantity)
            .bind(unit)
            .bind(notes)
            .bind(priority)
            .bind(added_by)
            .fetch_one(&self.pool)
            .await
    }

    /// Applies an update and refreshes updated_at.
    ///
    /// Returns the updated entity, or `None` when the item does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: ListItemUpdate<'_>,
    ) -> Result<Option<ListItemEntity>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE list_items
            SET product_name = COALESCE($2, product_name),
                quantity = COALESCE($3, quantity),
                unit = COALESCE($4, unit),
                notes = COALESCE($5, notes),
                priority = COALESCE($6, priority),
                purchased = $7,
                purchased_by = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ListItemEntity>(&query)
            .bind(id)
            .bind(update.product_name)
            .bind(update.quantity)
            .bind(update.unit)
            .bind(update.notes)
            .bind(update.priority)
            .bind(update.purchased)
            .bind(update.purchased_by)
            .fetch_optional(&self.pool)
            .await
    }

    /// Deletes an item. Returns true when it existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
