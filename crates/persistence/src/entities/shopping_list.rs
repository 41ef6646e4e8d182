//! Shopping list entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the shopping_lists table.
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingListEntity {
    /// Whether the given user owns this list.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

impl From<ShoppingListEntity> for domain::models::ShoppingList {
    fn from(entity: ShoppingListEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_id: entity.owner_id,
            archived: entity.archived,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owned_by() {
        let owner = Uuid::new_v4();
        let entity = ShoppingListEntity {
            id: Uuid::new_v4(),
            name: "Groceries".to_string(),
            description: None,
            owner_id: owner,
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(entity.is_owned_by(owner));
        assert!(!entity.is_owned_by(Uuid::new_v4()));
    }
}
