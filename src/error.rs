use thiserror::Error;

/// Errors surfaced by the client.
///
/// The persistence layer has its own [`StoreError`]; credential save
/// failures inside the token lifecycle are logged and never escalated,
/// because the in-memory credential remains usable.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure: DNS, connection, timeout.
    #[error("executing request: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-200 response from the GraphQL endpoint.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Non-200 response from the token endpoint.
    #[error("authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    /// Full authentication was required but no password is configured.
    /// Callers prompt for a password before reaching this path.
    #[error("password required for authentication")]
    PasswordRequired,

    /// A token was requested before any credential was ever acquired.
    #[error("no credential available; authenticate before issuing requests")]
    NotAuthenticated,

    /// The server accepted the transport but rejected the request; carries
    /// every message from the response's `errors` array.
    #[error("graphql errors: {0:?}")]
    GraphQL(Vec<String>),

    /// The response body or its `data` payload did not match the expected
    /// shape.
    #[error("decoding response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Both envelope shapes for the receipts payload failed to decode.
    #[error("failed to decode as object: {object}, and as array: {array}")]
    ShapeMismatch {
        object: Box<Error>,
        array: Box<Error>,
    },

    /// The query succeeded but the payload was empty.
    #[error("no {0} data returned")]
    NoData(&'static str),

    #[error("no receipt found for barcode {0}")]
    ReceiptNotFound(String),

    #[error("credential store: {0}")]
    Store(#[from] StoreError),
}

/// Credential store failures. Kept separate from [`Error`] so the lifecycle
/// manager can log-and-continue while CLI-level save/load can still surface
/// them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config directory unavailable")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("decoding stored file: {0}")]
    Format(#[from] serde_json::Error),
}
