//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process record store used without a database URL
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **security**: JWT token codec and Argon2 credential hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
