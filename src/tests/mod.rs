#[cfg(test)]
pub mod common;

mod graphql_transport;
