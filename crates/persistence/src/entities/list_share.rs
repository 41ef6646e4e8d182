//! List share entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::PermissionLevel;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the list_shares table.
///
/// `permission_level` is stored as text ("VIEWER" | "EDITOR" | "ADMIN").
#[derive(Debug, Clone, FromRow)]
pub struct ListShareEntity {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub shared_user_id: Uuid,
    pub permission_level: String,
    pub shared_at: DateTime<Utc>,
}

impl ListShareEntity {
    /// Parses the stored permission level.
    ///
    /// Unknown values degrade to Viewer, the least-privileged level.
    pub fn level(&self) -> PermissionLevel {
        PermissionLevel::from_str(&self.permission_level).unwrap_or(PermissionLevel::Viewer)
    }
}

impl From<ListShareEntity> for domain::models::ListShare {
    fn from(entity: ListShareEntity) -> Self {
        let permission_level = entity.level();
        Self {
            id: entity.id,
            shopping_list_id: entity.shopping_list_id,
            shared_user_id: entity.shared_user_id,
            permission_level,
            shared_at: entity.shared_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_with_level(level: &str) -> ListShareEntity {
        ListShareEntity {
            id: Uuid::new_v4(),
            shopping_list_id: Uuid::new_v4(),
            shared_user_id: Uuid::new_v4(),
            permission_level: level.to_string(),
            shared_at: Utc::now(),
        }
    }

    #[test]
    fn test_level_parses_known_values() {
        assert_eq!(entity_with_level("VIEWER").level(), PermissionLevel::Viewer);
        assert_eq!(entity_with_level("EDITOR").level(), PermissionLevel::Editor);
        assert_eq!(entity_with_level("ADMIN").level(), PermissionLevel::Admin);
    }

    #[test]
    fn test_level_degrades_unknown_to_viewer() {
        assert_eq!(entity_with_level("SUPERUSER").level(), PermissionLevel::Viewer);
        assert_eq!(entity_with_level("").level(), PermissionLevel::Viewer);
    }

    #[test]
    fn test_into_domain_model() {
        let entity = entity_with_level("EDITOR");
        let share: domain::models::ListShare = entity.clone().into();
        assert_eq!(share.id, entity.id);
        assert_eq!(share.permission_level, PermissionLevel::Editor);
    }
}
