//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The GraphQL schema lives under [`graphql`]; [`http`] serves it over
//! actix-web alongside the health probes.

pub mod graphql;
pub mod http;
