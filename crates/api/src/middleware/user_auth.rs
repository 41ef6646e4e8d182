//! User JWT authentication support.
//!
//! Token validation shared by the `UserAuth` extractor.

use uuid::Uuid;

use crate::config::JwtAuthConfig;
use shared::jwt::JwtConfig;

/// Authenticated user information extracted from a JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// JWT ID (jti) for log correlation.
    pub jti: String,
}

impl UserAuth {
    /// Validates an access token and returns user authentication info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;

        Ok(UserAuth {
            user_id,
            jti: claims.jti,
        })
    }

    /// Creates a JwtConfig from the service's JWT settings.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::with_leeway(
            &config.private_key,
            &config.public_key,
            config.access_token_expiry_secs,
            config.refresh_token_expiry_secs,
            config.leeway_secs,
        )
        .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_own_token() {
        let jwt = JwtConfig::new_for_testing("middleware-test-secret");
        let user_id = Uuid::new_v4();
        let (token, jti) = jwt.generate_access_token(user_id).unwrap();

        let auth = UserAuth::validate(&jwt, &token).unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.jti, jti);
    }

    #[test]
    fn test_validate_rejects_refresh_token() {
        let jwt = JwtConfig::new_for_testing("middleware-test-secret");
        let (token, _) = jwt.generate_refresh_token(Uuid::new_v4()).unwrap();

        assert!(UserAuth::validate(&jwt, &token).is_err());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let jwt = JwtConfig::new_for_testing("middleware-test-secret");
        assert!(UserAuth::validate(&jwt, "not-a-token").is_err());
    }

    #[test]
    fn test_create_jwt_config_rejects_bad_keys() {
        let config = JwtAuthConfig {
            private_key: "bad".to_string(),
            public_key: "bad".to_string(),
            access_token_expiry_secs: 3600,
            refresh_token_expiry_secs: 2592000,
            leeway_secs: 30,
        };
        assert!(UserAuth::create_jwt_config(&config).is_err());
    }
}
