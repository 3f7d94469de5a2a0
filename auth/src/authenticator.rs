use std::sync::Arc;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::revocation::RevocationRegistry;

/// Session coordinator combining credential verification, token issuance
/// and revocation. Hashing for storage is left to whoever persists users.
///
/// Owns the token codec and shares the revocation registry with whoever
/// holds the same `Arc` (the HTTP layer and the shutdown hook).
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    revocations: Arc<RevocationRegistry>,
    token_ttl: Duration,
}

/// Token handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Invalid token: {0}")]
    InvalidToken(JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
    pub const TOKEN_TYPE: &'static str = "bearer";

    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued access tokens
    /// * `revocations` - Process-wide revocation registry
    pub fn new(jwt_secret: &[u8], token_ttl: Duration, revocations: Arc<RevocationRegistry>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            revocations,
            token_ttl,
        }
    }

    pub fn revocations(&self) -> &Arc<RevocationRegistry> {
        &self.revocations
    }

    /// Issue a signed access token for `subject`, expiring after the TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a token. Does not consult the revocation registry.
    pub fn decode_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Verify credentials and start a new session for `subject`.
    ///
    /// On success a fresh token is issued and every revocation entry held for
    /// `subject` is purged.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub async fn login(
        &self,
        subject: &str,
        password: &str,
        stored_hash: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        let purged = self
            .revocations
            .purge_for_subject(subject, |token| {
                self.jwt_handler
                    .decode::<Claims>(token)
                    .map(|claims| claims.sub)
            })
            .await;
        tracing::debug!(subject, purged, "Session started");

        Ok(AuthenticationResult {
            access_token,
            token_type: Self::TOKEN_TYPE,
        })
    }

    /// End the session carried by `token` by revoking it until its own expiry.
    ///
    /// # Returns
    /// Claims of the revoked token
    ///
    /// # Errors
    /// * `InvalidToken` - Token does not decode, or lacks `sub`/`exp`
    pub async fn logout(&self, token: &str) -> Result<Claims, AuthenticationError> {
        let claims = self
            .decode_token(token)
            .map_err(AuthenticationError::InvalidToken)?;

        if claims.subject().is_none() {
            return Err(AuthenticationError::InvalidToken(JwtError::MissingClaim(
                "sub".to_string(),
            )));
        }

        let expiry = claims.expires_at().ok_or_else(|| {
            AuthenticationError::InvalidToken(JwtError::MissingClaim("exp".to_string()))
        })?;

        self.revocations.revoke(token, expiry).await;

        Ok(claims)
    }

    /// Per-request gate: accept `token` and return its subject, or reject it.
    ///
    /// The registry is consulted before the signature, so a revoked token is
    /// refused even though it would still decode.
    ///
    /// # Errors
    /// * `TokenRevoked` - Token was logged out and has not expired yet
    /// * `InvalidToken` - Token does not decode or lacks `sub`
    pub async fn authorize(&self, token: &str) -> Result<String, AuthenticationError> {
        if self.revocations.is_revoked(token).await {
            return Err(AuthenticationError::TokenRevoked);
        }

        let claims = self
            .decode_token(token)
            .map_err(AuthenticationError::InvalidToken)?;

        claims.sub.ok_or_else(|| {
            AuthenticationError::InvalidToken(JwtError::MissingClaim("sub".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(
            SECRET,
            Duration::minutes(Authenticator::DEFAULT_TOKEN_TTL_MINUTES),
            Arc::new(RevocationRegistry::new()),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = authenticator();
        let hash = PasswordHasher::new().hash("pw1").unwrap();

        let result = authenticator
            .login("alice", "pw1", &hash)
            .await
            .expect("Login failed");

        assert_eq!(result.token_type, "bearer");
        let claims = authenticator.decode_token(&result.access_token).unwrap();
        assert_eq!(claims.subject(), Some("alice"));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 30 * 60);
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let authenticator = authenticator();
        let hash = PasswordHasher::new().hash("pw1").unwrap();

        let result = authenticator.login("alice", "wrong", &hash).await;
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_issue_and_decode_round_trip() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice").unwrap();

        let claims = authenticator.decode_token(&token).unwrap();
        assert_eq!(claims.subject(), Some("alice"));
    }

    #[tokio::test]
    async fn test_authorize_accepts_fresh_token() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice").unwrap();

        let subject = authenticator.authorize(&token).await.unwrap();
        assert_eq!(subject, "alice");
    }

    #[tokio::test]
    async fn test_authorize_rejects_malformed_token() {
        let authenticator = authenticator();

        let result = authenticator.authorize("not-a-token").await;
        assert!(matches!(result, Err(AuthenticationError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_authorize_rejects_token_without_subject() {
        let authenticator = authenticator();
        let claims = Claims::new().with_expiration((Utc::now() + Duration::minutes(5)).timestamp());
        let token = JwtHandler::new(SECRET).encode(&claims).unwrap();

        let result = authenticator.authorize(&token).await;
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidToken(JwtError::MissingClaim(_)))
        ));
    }

    #[tokio::test]
    async fn test_logout_revokes_until_expiry() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice").unwrap();

        let claims = authenticator.logout(&token).await.unwrap();

        // Still decodes, but the gate refuses it.
        assert!(authenticator.decode_token(&token).is_ok());
        assert!(matches!(
            authenticator.authorize(&token).await,
            Err(AuthenticationError::TokenRevoked)
        ));

        let after_expiry = claims.expires_at().unwrap() + Duration::seconds(1);
        assert!(
            !authenticator
                .revocations()
                .is_revoked_at(&token, after_expiry)
                .await
        );
    }

    #[tokio::test]
    async fn test_logout_rejects_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.logout("invalid.token.here").await;
        assert!(matches!(result, Err(AuthenticationError::InvalidToken(_))));
        assert!(authenticator.revocations().is_empty().await);
    }

    #[tokio::test]
    async fn test_login_purges_subject_revocations() {
        let authenticator = authenticator();
        let hash = PasswordHasher::new().hash("pw1").unwrap();

        let first = authenticator.login("alice", "pw1", &hash).await.unwrap();
        authenticator.logout(&first.access_token).await.unwrap();

        let bob = authenticator.issue_token("bob").unwrap();
        authenticator.logout(&bob).await.unwrap();

        let second = authenticator.login("alice", "pw1", &hash).await.unwrap();

        assert_ne!(first.access_token, second.access_token);
        assert_eq!(
            authenticator.authorize(&second.access_token).await.unwrap(),
            "alice"
        );
        assert_eq!(authenticator.revocations().len().await, 1);
        assert!(matches!(
            authenticator.authorize(&bob).await,
            Err(AuthenticationError::TokenRevoked)
        ));
    }

    #[tokio::test]
    async fn test_login_survives_undecodable_revocation_entry() {
        let authenticator = authenticator();
        let hash = PasswordHasher::new().hash("pw1").unwrap();
        authenticator
            .revocations()
            .revoke("garbage", Utc::now() + Duration::minutes(5))
            .await;

        let result = authenticator.login("alice", "pw1", &hash).await;

        assert!(result.is_ok());
        assert_eq!(authenticator.revocations().len().await, 1);
    }
}
