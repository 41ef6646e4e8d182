//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table, with roles aggregated from
/// user_roles.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            first_name: entity.first_name,
            last_name: entity.last_name,
            roles: entity.roles,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl UserEntity {
    /// Case-insensitive email comparison, matching the invitation
    /// addressing rules.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entity() -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            username: "carol".to_string(),
            email: "Carol@Example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: None,
            last_name: None,
            roles: vec!["user".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_matches_is_case_insensitive() {
        let entity = sample_entity();
        assert!(entity.email_matches("carol@example.com"));
        assert!(entity.email_matches("CAROL@EXAMPLE.COM"));
        assert!(!entity.email_matches("other@example.com"));
    }

    #[test]
    fn test_into_domain_model() {
        let entity = sample_entity();
        let user: domain::models::User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.username, "carol");
        assert_eq!(user.roles, vec!["user".to_string()]);
    }
}
