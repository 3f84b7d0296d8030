//! Credential lifecycle: decides when the cached credential is reused,
//! refreshed, or re-acquired, and keeps disk in sync with memory.

use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::auth::store::StoredCredentials;
use crate::auth::Credential;
use crate::client::Client;
use crate::error::Error;

/// Warn this close to the local expiry so operators can spot sessions that
/// are about to pay for a renewal.
const EXPIRY_WARN_WINDOW_MINUTES: i64 = 5;

/// Lock-guarded slot for the current credential.
///
/// Readers (freshness checks, token snapshots) take the shared lock; the
/// write lock is held for the whole renewal exchange so no caller ever
/// observes a partially updated credential.
#[derive(Debug, Default)]
pub(crate) struct CredentialCache {
    slot: RwLock<Option<Credential>>,
}

impl CredentialCache {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }

    pub(crate) async fn snapshot(&self) -> Option<Credential> {
        self.slot.read().await.clone()
    }

    #[cfg(test)]
    pub(crate) async fn install(&self, credential: Credential) {
        *self.slot.write().await = Some(credential);
    }
}

impl Client {
    /// Guarantee the cached credential is valid before an outbound call.
    ///
    /// Fast path: shared lock, no network. Stale or absent: exclusive lock
    /// for the whole exchange — refresh when a usable refresh token exists,
    /// any refresh failure falls back to a full login (refresh tokens can be
    /// invalidated server-side without notice, and a fresh login is the only
    /// recovery). Two callers racing past the fast path will each run the
    /// exchange; the duplicate is harmless and both end up with a valid
    /// credential.
    pub(crate) async fn ensure_fresh(&self) -> Result<(), Error> {
        {
            let slot = self.credentials.slot.read().await;
            if let Some(cred) = slot.as_ref() {
                let now = Utc::now();
                if cred.is_fresh(now) {
                    let until_expiry = cred.expires_at - now;
                    if until_expiry < TimeDelta::minutes(EXPIRY_WARN_WINDOW_MINUTES) {
                        warn!(
                            seconds_until_expiry = until_expiry.num_seconds(),
                            "token expiring soon"
                        );
                    }
                    return Ok(());
                }
            }
        }

        let mut slot = self.credentials.slot.write().await;

        let refresh_token = slot
            .as_ref()
            .filter(|cred| cred.has_usable_refresh_token(Utc::now()))
            .map(|cred| cred.refresh_token.clone());
        debug!(
            has_refresh_token = refresh_token.is_some(),
            "token renewal needed"
        );

        let fresh = match refresh_token {
            Some(token) => match self.refresh_credential(&token).await {
                Ok(cred) => cred,
                Err(err) => {
                    warn!(error = %err, "token refresh failed, falling back to authentication");
                    self.authenticate().await?
                }
            },
            None => self.authenticate().await?,
        };

        *slot = Some(fresh.clone());
        drop(slot);

        // Disk write happens with no lock held so readers are never stuck
        // behind filesystem latency; a failed save is logged and the
        // in-memory credential stays authoritative.
        self.persist(&fresh);
        Ok(())
    }

    /// Snapshot of the current identity token for the bearer header.
    /// Valid only after [`Client::ensure_fresh`] succeeded on this call path.
    pub(crate) async fn bearer_token(&self) -> Result<String, Error> {
        self.credentials
            .snapshot()
            .await
            .map(|cred| cred.id_token)
            .ok_or(Error::NotAuthenticated)
    }

    fn persist(&self, credential: &Credential) {
        let Some(store) = &self.store else {
            return;
        };
        let record = StoredCredentials {
            id_token: credential.id_token.clone(),
            refresh_token: credential.refresh_token.clone(),
            token_expiry: credential.expires_at,
            refresh_token_expires_at: credential.refresh_expires_at,
            updated_at: Utc::now(),
        };
        match store.save_credentials(record) {
            Ok(_) => debug!("credential saved to disk"),
            Err(err) => warn!(error = %err, "failed to save credential"),
        }
    }
}
