//! HTTP inbound adapter: the GraphQL endpoint and health probes.

pub mod cache_control;
pub mod error;
pub mod graphql;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
