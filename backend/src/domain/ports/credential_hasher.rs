//! Port for password hashing.

use super::define_port_error;

define_port_error! {
    /// Hashing failures.
    pub enum CredentialHashError {
        /// Producing a hash failed.
        Hashing { message: String } => "credential hashing failed: {message}",
        /// A stored hash could not be parsed.
        CorruptHash { message: String } => "stored credential hash unreadable: {message}",
    }
}

/// Hashes passwords for storage and checks supplied passwords against them.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;

    /// `Ok(false)` on mismatch; errors are reserved for unreadable hashes.
    fn verify(&self, stored: &str, supplied: &str) -> Result<bool, CredentialHashError>;
}
