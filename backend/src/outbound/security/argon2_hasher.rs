//! Argon2id password hashing.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash};
use rand::rngs::OsRng;

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Stores passwords as PHC strings with a fresh random salt each time.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        Argon2::default()
            .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHashError::hashing(err.to_string()))
    }

    fn verify(&self, stored: &str, supplied: &str) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|err| CredentialHashError::corrupt_hash(err.to_string()))?;
        match Argon2::default().verify_password(supplied.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::corrupt_hash(err.to_string())),
        }
    }
}
