//! Email/password sign-in and access token authentication.

use std::sync::Arc;

use tracing::{info, warn};

use noticeflow_auth::jwt::{IssuedToken, JwtDecoder, JwtEncoder};
use noticeflow_auth::password::PasswordHasher;
use noticeflow_core::error::AppError;
use noticeflow_database::store::UserStore;
use noticeflow_entity::user::User;

use crate::context::RequestContext;

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInResult {
    /// The signed-in user.
    pub user: User,
    /// The issued access token.
    pub token: IssuedToken,
}

/// Authenticates users and their access tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            encoder,
            decoder,
        }
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown emails, wrong passwords, and inactive accounts all fail with
    /// the same `unauthorized` message.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AppError> {
        let invalid = || AppError::unauthorized("Invalid email or password");

        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            warn!(email = %email, "Sign-in for unknown email");
            return Err(invalid());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Sign-in with wrong password");
            return Err(invalid());
        }

        if !user.can_login() {
            warn!(user_id = %user.id, "Sign-in for inactive user");
            return Err(invalid());
        }

        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User signed in");

        Ok(SignInResult { user, token })
    }

    /// Validates an access token and builds the request context from its claims.
    pub fn authenticate(&self, token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode(token)?;
        Ok(RequestContext::new(
            claims.sub,
            claims.role,
            claims.name,
            claims.email,
        ))
    }

    /// Loads the user behind the current request.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .filter(User::can_login)
            .ok_or_else(|| AppError::unauthorized("User no longer exists or is inactive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noticeflow_core::config::auth::AuthConfig;
    use noticeflow_core::error::ErrorKind;
    use noticeflow_database::memory::MemoryStore;
    use noticeflow_entity::user::{CreateUser, UserRole};

    async fn service_with_user() -> AuthService {
        let store = Arc::new(MemoryStore::new());
        let hash = PasswordHasher::new().hash_password("password123").unwrap();
        UserStore::create(
            store.as_ref(),
            &CreateUser {
                name: "Nina Notifier".into(),
                email: "nina@example.com".into(),
                password_hash: hash,
                role: UserRole::Notifier,
            },
        )
        .await
        .unwrap();

        let config = AuthConfig::default();
        AuthService::new(
            store,
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(JwtDecoder::new(&config)),
        )
    }

    #[tokio::test]
    async fn test_sign_in_then_authenticate() {
        let auth = service_with_user().await;
        let result = auth.sign_in("NINA@example.com", "password123").await.unwrap();
        let ctx = auth.authenticate(&result.token.access_token).unwrap();
        assert_eq!(ctx.user_id, result.user.id);
        assert_eq!(ctx.role, UserRole::Notifier);
        assert_eq!(auth.current_user(&ctx).await.unwrap().name, "Nina Notifier");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let auth = service_with_user().await;
        let wrong = auth.sign_in("nina@example.com", "nope-nope").await.unwrap_err();
        let unknown = auth.sign_in("who@example.com", "password123").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.message, unknown.message);
    }
}
