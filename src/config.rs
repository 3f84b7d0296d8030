use std::time::Duration;

use crate::constants::{
    DEFAULT_WAREHOUSE, GRAPHQL_ENDPOINT, TOKEN_ENDPOINT, TOKEN_REFRESH_BUFFER_SECS,
};

/// Configuration for building a [`crate::Client`].
///
/// `password` may be empty when a persisted refresh token is expected to
/// cover the session; callers are responsible for prompting before full
/// authentication becomes necessary.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub email: String,
    pub password: String,
    /// Default warehouse number used by order queries.
    pub warehouse_number: String,
    /// How early to renew tokens before their true expiry.
    pub token_refresh_buffer: Duration,
}

impl ClientConfig {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            warehouse_number: DEFAULT_WAREHOUSE.to_owned(),
            token_refresh_buffer: Duration::from_secs(TOKEN_REFRESH_BUFFER_SECS),
        }
    }
}

/// Upstream endpoint URLs. Production values by default; tests point these
/// at local mock servers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token_url: String,
    pub graphql_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_ENDPOINT.to_owned(),
            graphql_url: GRAPHQL_ENDPOINT.to_owned(),
        }
    }
}
