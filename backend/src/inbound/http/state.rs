//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the schema and the token port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::{IdentityResolver, TokenLifetimes};
use crate::domain::ports::TokenCodec;
use crate::inbound::graphql::{GraphQlServices, RegistrarSchema, ServicePorts, build_schema};

/// Dependency bundle for the GraphQL endpoint.
#[derive(Clone)]
pub struct GraphQlState {
    pub schema: RegistrarSchema,
    pub identities: IdentityResolver<dyn TokenCodec>,
}

impl GraphQlState {
    pub fn new(schema: RegistrarSchema, identities: IdentityResolver<dyn TokenCodec>) -> Self {
        Self { schema, identities }
    }

    /// Build the schema and identity resolver over one set of adapters.
    ///
    /// The same token codec signs tokens at login and verifies them on
    /// every request.
    pub fn from_ports(ports: ServicePorts, lifetimes: TokenLifetimes) -> Self {
        let tokens: Arc<dyn TokenCodec> = ports.tokens.clone();
        let schema = build_schema(GraphQlServices::new(ports, lifetimes));
        Self::new(schema, IdentityResolver::new(tokens))
    }
}
