pub mod credential;
pub mod store;

pub use credential::{Credential, TokenResponse};
pub use store::{CredentialStore, StoredConfig, StoredCredentials};
