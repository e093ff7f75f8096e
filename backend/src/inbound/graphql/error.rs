//! GraphQL mapping for domain errors.
//!
//! Every resolver failure leaves the process as a GraphQL error whose
//! `extensions.code` is the domain [`ErrorCode`] string. Internal failures are
//! logged in full and replaced by a generic message before they are returned.

use async_graphql::ErrorExtensions;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Client-facing message for redacted internal failures.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        let internal = matches!(self.code(), ErrorCode::InternalError);
        let message = if internal {
            error!(
                message = self.message(),
                trace_id = self.trace_id(),
                "internal error surfaced to graphql"
            );
            INTERNAL_MESSAGE
        } else {
            self.message()
        };
        let details = self
            .details()
            .filter(|_| !internal)
            .and_then(|d| async_graphql::Value::from_json(d.clone()).ok());

        async_graphql::Error::new(message).extend_with(|_, ext| {
            ext.set("code", self.code().as_str());
            if let Some(id) = self.trace_id() {
                ext.set("traceId", id);
            }
            if let Some(details) = details {
                ext.set("details", details);
            }
        })
    }
}
