//! GraphQL inbound adapter.
//!
//! Purpose: expose students, courses and accounts through an `async-graphql`
//! schema. Resolvers stay thin: they convert inputs into validated domain
//! values, pass the request identity along, and map domain errors onto
//! `extensions.code`.

mod context;
mod error;
mod inputs;
mod mutation;
mod query;
mod types;

use async_graphql::{EmptySubscription, Schema};

pub use self::context::{
    DynAccountService, DynEnrollmentService, DynRecordsService, GraphQlServices, ServicePorts,
};
pub use self::error::INTERNAL_MESSAGE;
pub use self::inputs::{
    CourseFilterInput, CourseUpdateInput, ListOptionsInput, StudentFilterInput,
    StudentUpdateInput,
};
pub use self::mutation::MutationRoot;
pub use self::query::QueryRoot;
pub use self::types::{AuthPayload, CourseObject, StudentObject, UserObject};

/// Executable schema served at `/graphql`.
pub type RegistrarSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the domain services attached as shared data.
///
/// The caller adds a [`crate::domain::RequestIdentity`] to each request's
/// data; requests without one are treated as anonymous.
pub fn build_schema(services: GraphQlServices) -> RegistrarSchema {
    let GraphQlServices {
        records,
        enrollment,
        accounts,
    } = services;
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(records)
        .data(enrollment)
        .data(accounts)
        .finish()
}

/// Schema definition language for the API, without any services attached.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}
