//! Port abstraction for user account persistence.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUserAccount, UserAccount};

use super::RecordStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert an account. Fails with `Duplicate { field: "email" }` when the
    /// address is already registered.
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, RecordStoreError>;

    /// Look an account up by its exact email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, RecordStoreError>;
}
