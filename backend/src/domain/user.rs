//! User accounts used only for authentication.

use super::{EmailAddress, UserId};

/// Stored account: email plus an opaque credential hash.
///
/// The hash format belongs to whichever `CredentialHasher` produced it; the
/// domain never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    email: EmailAddress,
    password_hash: String,
}

impl UserAccount {
    pub fn new(id: UserId, email: EmailAddress, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            email,
            password_hash: password_hash.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Account awaiting insertion; the store assigns nothing but uniqueness
/// checks, so the id is allocated up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

impl From<NewUserAccount> for UserAccount {
    fn from(value: NewUserAccount) -> Self {
        Self::new(value.id, value.email, value.password_hash)
    }
}
