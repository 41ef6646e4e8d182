//! List item entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the list_items table.
#[derive(Debug, Clone, FromRow)]
pub struct ListItemEntity {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub product_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub purchased: bool,
    pub notes: Option<String>,
    pub priority: Option<i32>,
    pub added_by: Option<Uuid>,
    pub purchased_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ListItemEntity> for domain::models::ListItem {
    fn from(entity: ListItemEntity) -> Self {
        Self {
            id: entity.id,
            shopping_list_id: entity.shopping_list_id,
            product_name: entity.product_name,
            quantity: entity.quantity,
            unit: entity.unit,
            purchased: entity.purchased,
            notes: entity.notes,
            priority: entity.priority,
            added_by: entity.added_by,
            purchased_by: entity.purchased_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
