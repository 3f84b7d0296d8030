pub mod lifecycle;
pub mod transport;

use std::time::Duration;

use tracing::{info, warn};

use crate::auth::store::CredentialStore;
use crate::auth::Credential;
use crate::config::{ClientConfig, Endpoints};
use crate::constants::{HTTP_TIMEOUT_SECS, TOKEN_REFRESH_BUFFER_SECS};
use crate::error::Error;
use lifecycle::CredentialCache;

/// Authenticated client for the e-commerce GraphQL API.
///
/// Owns the credential exclusively; see [`lifecycle`] for the renewal
/// rules and [`transport`] for the wire exchanges.
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) endpoints: Endpoints,
    pub(crate) credentials: CredentialCache,
    pub(crate) store: Option<CredentialStore>,
}

impl Client {
    /// Build a client against the production endpoints, restoring any
    /// persisted credential from disk.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let store = match CredentialStore::from_env() {
            Ok(store) => Some(store),
            Err(err) => {
                warn!(error = %err, "credential store unavailable, tokens will not persist");
                None
            }
        };

        let saved = store.as_ref().and_then(|store| match store.load_credentials() {
            Ok(saved) => saved,
            Err(err) => {
                warn!(error = %err, "failed to load persisted credential");
                None
            }
        });

        let mut client = Self::build(config, Endpoints::default(), store)?;
        if let Some(saved) = saved {
            info!(token_expiry = %saved.token_expiry, "credential restored from disk");
            client.credentials = CredentialCache::with(Credential {
                id_token: saved.id_token,
                refresh_token: saved.refresh_token,
                expires_at: saved.token_expiry,
                refresh_expires_at: saved.refresh_token_expires_at,
            });
        }

        Ok(client)
    }

    /// Build a client against explicit endpoints, with no on-disk
    /// persistence. Tests use this to target local mock servers.
    pub fn with_endpoints(config: ClientConfig, endpoints: Endpoints) -> Result<Self, Error> {
        Self::build(config, endpoints, None)
    }

    fn build(
        mut config: ClientConfig,
        endpoints: Endpoints,
        store: Option<CredentialStore>,
    ) -> Result<Self, Error> {
        if config.token_refresh_buffer.is_zero() {
            config.token_refresh_buffer = Duration::from_secs(TOKEN_REFRESH_BUFFER_SECS);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            config,
            endpoints,
            credentials: CredentialCache::empty(),
            store,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
