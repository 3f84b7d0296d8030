use reqwest::header::{HeaderMap, HeaderValue};

// API endpoints

pub const TOKEN_ENDPOINT: &str = "https://signin.costco.com/e0714dd4-784d-46d6-a278-3e29553483eb/b2c_1a_sso_wcs_signup_signin_157/oauth2/v2.0/token";
pub const GRAPHQL_ENDPOINT: &str =
    "https://ecom-api.costco.com/ebusiness/order/v1/orders/graphql";

// OAuth2/OIDC configuration (public identifiers)

pub const CLIENT_ID: &str = "a3a5186b-7c89-4b4c-93a8-dd604e930757";
pub const CLIENT_IDENTIFIER: &str = "481b1aec-aa3b-454b-b81b-48187e28f205";
pub const WCS_CLIENT_ID: &str = "4900eb1f-0c10-4bd9-99c3-c59e6c1ecebf";
pub const SCOPE: &str = "openid offline_access";
pub const PASSWORD_GRANT: &str = "password";
pub const REFRESH_GRANT: &str = "refresh_token";
pub const RESPONSE_TYPE: &str = "token id_token";

// MSAL library fields the token endpoint expects on every request

pub const MSAL_CLIENT_SKU: &str = "msal.js.browser";
pub const MSAL_CLIENT_VERSION: &str = "2.32.1";
pub const MSAL_LIB_CAPABILITY: &str = "retry-after, h429";
pub const MSAL_CURRENT_TELEMETRY: &str = "5|61,0,,,|@azure/msal-react,1.5.1";
pub const MSAL_LAST_TELEMETRY: &str = "5|0|||0,0";

// Header names specific to the upstream service

pub const HEADER_AUTHORIZATION: &str = "costco-x-authorization";
pub const HEADER_CLIENT_IDENTIFIER: &str = "client-identifier";
pub const HEADER_WCS_CLIENT_ID: &str = "costco-x-wcs-clientId";
pub const HEADER_ENV: &str = "costco.env";
pub const HEADER_SERVICE: &str = "costco.service";

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded;charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json-patch+json";

pub const SERVICE_ENV: &str = "ecom";
pub const SERVICE_NAME: &str = "restOrders";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";

// Defaults

pub const DEFAULT_WAREHOUSE: &str = "847";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const TOKEN_REFRESH_BUFFER_SECS: u64 = 5 * 60;

/// Browser-fingerprint headers attached to every outbound request.
///
/// The upstream service rejects requests that do not look like its own web
/// storefront; the exact name/value pairs are part of the external interface
/// and must stay byte-identical across requests.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Accept", HeaderValue::from_static("*/*"));
    headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));
    headers.insert("Origin", HeaderValue::from_static("https://www.costco.com"));
    headers.insert("Pragma", HeaderValue::from_static("no-cache"));
    headers.insert("Referer", HeaderValue::from_static("https://www.costco.com/"));
    headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
    headers
}

/// Headers for GraphQL calls: the browser set plus the fixed client/service
/// identifiers. The bearer header is attached separately per request.
pub fn graphql_headers() -> HeaderMap {
    let mut headers = browser_headers();
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("empty"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("cors"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-site"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(r#""Chromium";v="139", "Not;A=Brand";v="99""#),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static(r#""macOS""#));
    headers.insert(
        HEADER_CLIENT_IDENTIFIER,
        HeaderValue::from_static(CLIENT_IDENTIFIER),
    );
    headers.insert(HEADER_WCS_CLIENT_ID, HeaderValue::from_static(WCS_CLIENT_ID));
    headers.insert(HEADER_ENV, HeaderValue::from_static(SERVICE_ENV));
    headers.insert(HEADER_SERVICE, HeaderValue::from_static(SERVICE_NAME));
    headers.insert("Content-Type", HeaderValue::from_static(CONTENT_TYPE_JSON));
    headers
}
