//! Registrar backend: a GraphQL service over students, courses and their
//! enrolments.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
