use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Access token claims.
///
/// Standard RFC 7519 claims used by session tokens. All fields are optional on
/// the wire so that a token missing a claim still decodes and can be rejected
/// explicitly by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create session claims for a subject, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Authenticated identity the token asserts
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with sub, exp, iat, and a random jti set
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        Self::for_subject_at(subject, ttl, Utc::now())
    }

    /// Same as [`Claims::for_subject`] with an explicit issuance instant.
    pub fn for_subject_at(subject: impl ToString, ttl: Duration, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: Some(subject.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(issued_at.timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Subject as a string slice, if present.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Expiration as an instant. `None` when the claim is absent or out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("alice");
        assert_eq!(claims.sub, Some("alice".to_string()));
        assert!(claims.exp.is_none());
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice", Duration::minutes(30));

        assert_eq!(claims.subject(), Some("alice"));
        assert!(claims.jti.is_some());

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 30 * 60);
    }

    #[test]
    fn test_for_subject_generates_distinct_ids() {
        let issued_at = Utc::now();
        let first = Claims::for_subject_at("alice", Duration::minutes(30), issued_at);
        let second = Claims::for_subject_at("alice", Duration::minutes(30), issued_at);

        assert_eq!(first.exp, second.exp);
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_expires_at() {
        let claims = Claims::new().with_expiration(1_700_000_000);
        assert_eq!(
            claims.expires_at().map(|at| at.timestamp()),
            Some(1_700_000_000)
        );
        assert!(Claims::new().expires_at().is_none());
    }
}
