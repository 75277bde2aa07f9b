//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use noticeflow_core::config::auth::AuthConfig;
use noticeflow_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // clock skew, seconds
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use noticeflow_core::error::ErrorKind;
    use noticeflow_entity::user::{User, UserRole};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Rita Reviewer".into(),
            email: "rita@example.com".into(),
            password_hash: String::new(),
            role: UserRole::Reviewer,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip_claims() {
        let cfg = config("test-secret");
        let user = user();
        let token = JwtEncoder::new(&cfg).issue(&user).unwrap();
        let claims = JwtDecoder::new(&cfg).decode(&token.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Reviewer);
        assert_eq!(claims.email, "rita@example.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = JwtEncoder::new(&config("one")).issue(&user()).unwrap();
        let err = JwtDecoder::new(&config("two"))
            .decode(&token.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_garbage_is_unauthorized() {
        let err = JwtDecoder::new(&config("one")).decode("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
