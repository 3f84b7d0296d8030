//! # Costco API Client Library
//!
//! Provides an authenticated client for the Costco e-commerce GraphQL API:
//! OAuth2 password/refresh token exchange, cached credentials with proactive
//! renewal, and typed order/receipt operations.
//!
//! Modules:
//! - `config` — client configuration and endpoint overrides
//! - `auth` — credential model, expiry computation, on-disk credential store
//! - `client` — token lifecycle and authenticated GraphQL transport
//! - `api` — query documents and typed order/receipt operations

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod tests;
pub mod utils;

pub use crate::client::Client;
pub use crate::config::{ClientConfig, Endpoints};
pub use crate::error::{Error, StoreError};
