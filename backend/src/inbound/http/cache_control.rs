//! Shared cache-control policies for HTTP handlers.

/// GraphQL responses may carry per-caller data and must never be reused.
pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Build the cache-control header tuple for GraphQL responses.
pub const fn private_no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_STORE)
}
