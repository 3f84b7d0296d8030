//! Wire exchanges: the OAuth2 token endpoint and the GraphQL endpoint.

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::{Credential, TokenResponse};
use crate::client::Client;
use crate::constants::{
    browser_headers, graphql_headers, CLIENT_ID, CONTENT_TYPE_FORM, HEADER_AUTHORIZATION,
    MSAL_CLIENT_SKU, MSAL_CLIENT_VERSION, MSAL_CURRENT_TELEMETRY, MSAL_LAST_TELEMETRY,
    MSAL_LIB_CAPABILITY, PASSWORD_GRANT, REFRESH_GRANT, RESPONSE_TYPE, SCOPE,
};
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    #[serde(default)]
    message: String,
}

/// Client-identification fields sent on every token request, both grants.
fn base_token_form() -> Vec<(&'static str, String)> {
    vec![
        ("client_id", CLIENT_ID.to_owned()),
        ("scope", SCOPE.to_owned()),
        ("client_info", "1".to_owned()),
        ("x-client-SKU", MSAL_CLIENT_SKU.to_owned()),
        ("x-client-VER", MSAL_CLIENT_VERSION.to_owned()),
        ("x-ms-lib-capability", MSAL_LIB_CAPABILITY.to_owned()),
        ("x-client-current-telemetry", MSAL_CURRENT_TELEMETRY.to_owned()),
        ("x-client-last-telemetry", MSAL_LAST_TELEMETRY.to_owned()),
        ("client-request-id", Uuid::new_v4().to_string()),
    ]
}

impl Client {
    /// Full password-grant login against the token endpoint.
    pub(crate) async fn authenticate(&self) -> Result<Credential, Error> {
        if self.config.password.is_empty() {
            return Err(Error::PasswordRequired);
        }
        debug!(email = %self.config.email, "authenticating");

        let mut form = base_token_form();
        form.push(("grant_type", PASSWORD_GRANT.to_owned()));
        form.push(("username", self.config.email.clone()));
        form.push(("password", self.config.password.clone()));
        form.push(("response_type", RESPONSE_TYPE.to_owned()));

        let cred = self.token_exchange(&form).await?;
        info!(token_expiry = %cred.expires_at, "authenticated");
        Ok(cred)
    }

    /// Refresh-grant exchange. Does not fall back to [`Client::authenticate`]
    /// itself; that decision belongs to the lifecycle layer.
    pub(crate) async fn refresh_credential(
        &self,
        refresh_token: &str,
    ) -> Result<Credential, Error> {
        debug!("refreshing token");

        let mut form = base_token_form();
        form.push(("grant_type", REFRESH_GRANT.to_owned()));
        form.push(("refresh_token", refresh_token.to_owned()));

        let cred = self.token_exchange(&form).await?;
        info!(token_expiry = %cred.expires_at, "token refreshed");
        Ok(cred)
    }

    async fn token_exchange(&self, form: &[(&str, String)]) -> Result<Credential, Error> {
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .headers(browser_headers())
            .form(form)
            .header(CONTENT_TYPE, CONTENT_TYPE_FORM)
            .send()
            .await
            .inspect_err(|err| error!(error = %err, "token request failed"))?;

        let status = response.status();
        debug!(status_code = status.as_u16(), "token response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(Error::Decode)?;
        Ok(Credential::from_token_response(
            &token,
            self.config.token_refresh_buffer,
        ))
    }

    /// One authenticated GraphQL request/response cycle.
    ///
    /// Renews the credential first, posts `{query, variables}` with the
    /// fixed header set plus the bearer header, and deserializes the
    /// envelope's `data` into `T`. A 200 carrying a non-empty `errors`
    /// array is a failure with every message attached.
    pub async fn execute_authenticated_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, Error> {
        self.ensure_fresh().await?;
        let token = self.bearer_token().await?;

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        debug!(endpoint = %self.endpoints.graphql_url, "sending graphql request");
        let response = self
            .http
            .post(&self.endpoints.graphql_url)
            .headers(graphql_headers())
            .header(HEADER_AUTHORIZATION, format!("Bearer {}", token))
            .json(&body)
            .send()
            .await
            .inspect_err(|err| error!(error = %err, "graphql request failed"))?;

        let status = response.status();
        debug!(status_code = status.as_u16(), "graphql response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status_code = status.as_u16(), "graphql request rejected");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let envelope: GraphqlEnvelope = serde_json::from_str(&text).map_err(Error::Decode)?;

        if !envelope.errors.is_empty() {
            warn!(error_count = envelope.errors.len(), "graphql errors in response");
            return Err(Error::GraphQL(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        serde_json::from_value(envelope.data).map_err(Error::Decode)
    }
}
