use std::time::Duration;

use base64::Engine;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::debug;

/// Assumed remaining lifetime when the identity token carries no readable
/// expiry claim. Upstream tokens live about an hour.
const FALLBACK_LIFETIME_MINUTES: i64 = 50;

/// Wire shape of the token endpoint response, for both the password and
/// refresh_token grants.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub id_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub not_before: i64,
    #[serde(default)]
    pub client_info: String,
    #[serde(default)]
    pub scope: String,
    /// Empty when the grant did not issue one.
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_token_expires_in: i64,
}

/// The in-memory credential: replaced wholesale on every successful
/// authentication or refresh, never partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub id_token: String,
    pub refresh_token: String,
    /// Local "must renew by" instant: the token's `exp` claim minus the
    /// configured refresh buffer.
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn from_token_response(resp: &TokenResponse, refresh_buffer: Duration) -> Self {
        Self {
            id_token: resp.id_token.clone(),
            refresh_token: resp.refresh_token.clone(),
            expires_at: expiry_from_id_token(&resp.id_token, refresh_buffer),
            refresh_expires_at: Utc::now()
                + TimeDelta::seconds(resp.refresh_token_expires_in),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Whether a refresh attempt is worth making before falling back to a
    /// full login.
    pub fn has_usable_refresh_token(&self, now: DateTime<Utc>) -> bool {
        !self.refresh_token.is_empty() && now < self.refresh_expires_at
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    exp: i64,
}

/// Compute the local expiry for an identity token.
///
/// The payload segment is decoded without verifying the signature; the
/// signature is checked server-side on every use, local parsing only
/// extracts the `exp` claim. Unparsable tokens get a conservative
/// fixed lifetime from now.
pub fn expiry_from_id_token(id_token: &str, refresh_buffer: Duration) -> DateTime<Utc> {
    if let Some(exp) = exp_claim(id_token) {
        if let Some(at) = DateTime::from_timestamp(exp - refresh_buffer.as_secs() as i64, 0) {
            debug!(expires_at = exp, "parsed identity token expiry");
            return at;
        }
    }
    Utc::now() + TimeDelta::minutes(FALLBACK_LIFETIME_MINUTES)
}

fn exp_claim(id_token: &str) -> Option<i64> {
    let payload = id_token.split('.').nth(1)?;
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    serde_json::from_slice::<IdTokenClaims>(&decoded)
        .ok()
        .map(|claims| claims.exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn sample_jwt(exp: i64) -> String {
        // minimal unsigned JWT: {"exp": exp}
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn expiry_is_claim_minus_buffer_exactly() {
        let exp = Utc::now().timestamp() + 3600;
        let buffer = Duration::from_secs(5 * 60);

        let at = expiry_from_id_token(&sample_jwt(exp), buffer);

        assert_eq!(at.timestamp(), exp - 300);
    }

    #[test]
    fn unparsable_token_defaults_to_fifty_minutes() {
        let before = Utc::now().timestamp();
        let at = expiry_from_id_token("not-a-jwt", Duration::from_secs(300));
        let after = Utc::now().timestamp();

        assert!(at.timestamp() >= before + 50 * 60);
        assert!(at.timestamp() <= after + 50 * 60);
    }

    #[test]
    fn missing_exp_claim_defaults_to_fifty_minutes() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"email":"member@example.com"}"#);
        let token = format!("{}.{}.sig", header, payload);

        let at = expiry_from_id_token(&token, Duration::from_secs(300));

        let delta = at.timestamp() - Utc::now().timestamp();
        assert!((50 * 60 - 5..=50 * 60 + 5).contains(&delta));
    }

    #[test]
    fn token_response_produces_full_credential() {
        let now = Utc::now().timestamp();
        let resp = TokenResponse {
            id_token: sample_jwt(now + 3600),
            token_type: "Bearer".into(),
            not_before: 0,
            client_info: String::new(),
            scope: String::new(),
            refresh_token: "R1".into(),
            refresh_token_expires_in: 7_776_000,
        };

        let cred = Credential::from_token_response(&resp, Duration::from_secs(300));

        // local expiry = claim - 5m, so now + 3595s give or take the clock read
        let delta = cred.expires_at.timestamp() - now;
        assert!((3594..=3596).contains(&delta), "delta was {}", delta);
        assert_eq!(cred.refresh_token, "R1");
        let refresh_delta = cred.refresh_expires_at.timestamp() - now;
        assert!((7_775_995..=7_776_005).contains(&refresh_delta));
        assert!(cred.is_fresh(Utc::now()));
        assert!(cred.has_usable_refresh_token(Utc::now()));
    }

    #[test]
    fn expired_credential_is_not_fresh() {
        let resp = TokenResponse {
            id_token: sample_jwt(Utc::now().timestamp() - 60),
            token_type: String::new(),
            not_before: 0,
            client_info: String::new(),
            scope: String::new(),
            refresh_token: String::new(),
            refresh_token_expires_in: 0,
        };

        let cred = Credential::from_token_response(&resp, Duration::from_secs(300));

        assert!(!cred.is_fresh(Utc::now()));
        assert!(!cred.has_usable_refresh_token(Utc::now()));
    }
}
