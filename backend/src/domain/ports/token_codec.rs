//! Port for issuing and verifying bearer tokens.

use std::time::Duration;

use crate::domain::{AccessToken, AuthIdentity};

use super::define_port_error;

define_port_error! {
    /// Token failures. Verification failures are never surfaced to callers;
    /// the identity resolver degrades them to an anonymous request.
    pub enum TokenError {
        /// The token could not be decoded.
        Malformed { message: String } => "token malformed: {message}",
        /// The signature did not verify.
        InvalidSignature => "token signature invalid",
        /// The token is past its expiry.
        Expired => "token expired",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs identities into tokens and resolves tokens back to identities.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token for `identity` valid for `ttl`.
    fn sign(&self, identity: &AuthIdentity, ttl: Duration) -> Result<AccessToken, TokenError>;

    /// Check signature and expiry, returning the embedded identity.
    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError>;
}
