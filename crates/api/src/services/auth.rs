//! Authentication service for user registration and login.

use persistence::entities::UserEntity;
use persistence::repositories::{NewUser, UserRepository};
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;

use crate::config::JwtAuthConfig;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: UserEntity,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Service wrapping credential handling and token issuance.
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    /// Creates an auth service bound to the pool and JWT settings.
    pub fn new(pool: PgPool, jwt_config: &JwtAuthConfig) -> Result<Self, AuthError> {
        let jwt = JwtConfig::with_leeway(
            &jwt_config.private_key,
            &jwt_config.public_key,
            jwt_config.access_token_expiry_secs,
            jwt_config.refresh_token_expiry_secs,
            jwt_config.leeway_secs,
        )
        .map_err(|e| AuthError::Internal(format!("Failed to initialize JWT config: {}", e)))?;

        Ok(Self {
            users: UserRepository::new(pool),
            jwt,
        })
    }

    /// Registers a new user and issues a token pair.
    ///
    /// Uniqueness of email and username is checked up front; the database
    /// constraints back the check up under concurrency.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<AuthResult, AuthError> {
        shared::validation::validate_password_strength(password).map_err(|e| {
            AuthError::WeakPassword(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Password too weak".to_string()),
            )
        })?;

        if self.users.email_exists(email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }
        if self.users.username_exists(username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash: &password_hash,
                first_name,
                last_name,
            })
            .await?;

        self.issue_tokens(user)
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// The login identifier may be a username or an email address.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user = match self.users.find_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.users.find_by_email(identifier).await?,
        };

        let Some(user) = user else {
            // Hash anyway to keep the failure path timing comparable.
            let _ = hash_password(password);
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: UserEntity) -> Result<AuthResult, AuthError> {
        let (access_token, _) = self.jwt.generate_access_token(user.id)?;
        let (refresh_token, _) = self.jwt.generate_refresh_token(user.id)?;

        Ok(AuthResult {
            user,
            access_token,
            refresh_token,
            expires_in: self.jwt.access_token_expiry_secs,
        })
    }
}
