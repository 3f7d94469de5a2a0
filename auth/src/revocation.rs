use std::collections::HashMap;
use std::fmt::Display;

use chrono::DateTime;
use chrono::Utc;
use tokio::sync::Mutex;

/// In-memory registry of tokens revoked before their natural expiry.
///
/// Maps token string -> expiry instant. Entries are never kept past the
/// expiry they were stored with: lookups reclaim them lazily, and subject
/// purges drop any expired entry they walk over. Nothing is persisted, so a
/// process restart forgets every revocation.
///
/// Every operation runs its read-modify-write under one lock acquisition.
#[derive(Debug, Default)]
pub struct RevocationRegistry {
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `token` is currently revoked.
    pub async fn is_revoked(&self, token: &str) -> bool {
        self.is_revoked_at(token, Utc::now()).await
    }

    /// Whether `token` is revoked as of `now`.
    ///
    /// An entry whose expiry has passed is removed and reported as not
    /// revoked, since the token no longer decodes anyway.
    pub async fn is_revoked_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.lock().await;

        match entries.get(token) {
            Some(&expiry) if now > expiry => {
                entries.remove(token);
                tracing::debug!(expired_at = %expiry, "Reclaimed expired revocation entry");
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Revoke `token` until `expiry`, overwriting any existing entry.
    pub async fn revoke(&self, token: impl Into<String>, expiry: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        entries.insert(token.into(), expiry);

        tracing::debug!(expires_at = %expiry, revoked = entries.len(), "Token revoked");
    }

    /// Remove every entry whose token names `subject`.
    ///
    /// `decode_subject` extracts the subject from a stored token. Entries it
    /// cannot decode are kept and logged rather than failing the purge.
    /// Entries already past their expiry are reclaimed regardless of subject.
    ///
    /// # Returns
    /// Number of entries removed
    pub async fn purge_for_subject<F, E>(&self, subject: &str, decode_subject: F) -> usize
    where
        F: Fn(&str) -> Result<Option<String>, E>,
        E: Display,
    {
        self.purge_for_subject_at(subject, Utc::now(), decode_subject)
            .await
    }

    /// Same as [`RevocationRegistry::purge_for_subject`] as of `now`.
    pub async fn purge_for_subject_at<F, E>(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        decode_subject: F,
    ) -> usize
    where
        F: Fn(&str) -> Result<Option<String>, E>,
        E: Display,
    {
        let mut entries = self.entries.lock().await;
        let before = entries.len();

        entries.retain(|token, expiry| {
            if now > *expiry {
                return false;
            }

            match decode_subject(token) {
                Ok(Some(owner)) => owner != subject,
                Ok(None) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable revocation entry");
                    true
                }
            }
        });

        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(subject, removed, "Purged revocation entries");
        }
        removed
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
