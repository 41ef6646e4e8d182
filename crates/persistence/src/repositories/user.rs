//! Repository for user database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;

/// Columns selected for every user query, with roles aggregated from
/// user_roles.
const USER_SELECT: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.first_name, u.last_name,
           COALESCE(array_agg(r.role) FILTER (WHERE r.role IS NOT NULL), '{}') AS roles,
           u.created_at, u.updated_at
    FROM users u
    LEFT JOIN user_roles r ON r.user_id = u.id
"#;

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

/// Partial profile update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

/// Repository for user operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a user and grants the default role, in one transaction.
    pub async fn create(&self, new_user: NewUser<'_>) -> Result<UserEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(domain::models::user::DEFAULT_ROLE)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        // Re-read through the aggregate query so roles come back populated.
        self.find_by_id(user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let query = format!("{USER_SELECT} WHERE u.id = $1 GROUP BY u.id");
        sqlx::query_as::<_, UserEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Finds a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let query = format!("{USER_SELECT} WHERE LOWER(u.email) = LOWER($1) GROUP BY u.id");
        sqlx::query_as::<_, UserEntity>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Finds a user by username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let query = format!("{USER_SELECT} WHERE u.username = $1 GROUP BY u.id");
        sqlx::query_as::<_, UserEntity>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    /// Checks whether an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Checks whether a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Applies a partial profile update and refreshes updated_at.
    ///
    /// Returns the updated entity, or `None` when the user does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: UserUpdate<'_>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.username)
        .bind(update.email)
        .bind(update.first_name)
        .bind(update.last_name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
