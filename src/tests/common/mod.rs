// Shared fixtures for the mock-server tests. The token and GraphQL
// endpoints run on two separate mock servers wired in through `Endpoints`.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{TimeDelta, Utc};
use httpmock::MockServer;
use serde_json::{json, Value};

use crate::auth::Credential;
use crate::client::Client;
use crate::config::{ClientConfig, Endpoints};

pub const TOKEN_PATH: &str = "/oauth2/v2.0/token";
pub const GRAPHQL_PATH: &str = "/graphql";

/// Minimal unsigned JWT carrying only an `exp` claim.
pub fn sample_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"exp":{},"iat":1757379753,"email":"member@example.com"}}"#,
        exp
    ));
    format!("{}.{}.signature", header, payload)
}

/// Token endpoint response body with a one-hour identity token.
pub fn token_response_body(refresh_token: &str) -> Value {
    json!({
        "id_token": sample_jwt(Utc::now().timestamp() + 3600),
        "token_type": "Bearer",
        "refresh_token": refresh_token,
        "refresh_token_expires_in": 7_776_000,
    })
}

pub fn test_config(password: &str) -> ClientConfig {
    ClientConfig {
        email: "member@example.com".into(),
        password: password.into(),
        warehouse_number: "847".into(),
        token_refresh_buffer: Duration::from_secs(300),
    }
}

/// Client pointed at the two mock servers, with no on-disk persistence.
pub fn test_client(token_server: &MockServer, graphql_server: &MockServer, password: &str) -> Client {
    Client::with_endpoints(
        test_config(password),
        Endpoints {
            token_url: token_server.url(TOKEN_PATH),
            graphql_url: graphql_server.url(GRAPHQL_PATH),
        },
    )
    .expect("client build")
}

/// A credential that will not need renewal during the test.
pub fn fresh_credential(id_token: &str) -> Credential {
    Credential {
        id_token: id_token.to_owned(),
        refresh_token: String::new(),
        expires_at: Utc::now() + TimeDelta::hours(1),
        refresh_expires_at: Utc::now() + TimeDelta::days(90),
    }
}

/// A credential past its local expiry.
pub fn expired_credential(refresh_token: &str) -> Credential {
    Credential {
        id_token: sample_jwt(Utc::now().timestamp() - 3600),
        refresh_token: refresh_token.to_owned(),
        expires_at: Utc::now() - TimeDelta::hours(1),
        refresh_expires_at: Utc::now() + TimeDelta::days(90),
    }
}
