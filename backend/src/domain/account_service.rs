//! Signup and login.
//!
//! Login failures never reveal whether the email exists: an unknown address,
//! a malformed one, and a wrong password all produce the same
//! `invalid_credentials` error.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::ports::{CredentialHasher, TokenCodec, UserRepository};
use crate::domain::{
    AuthGrant, AuthIdentity, Credentials, Error, NewUserAccount, TokenLifetimes, UserAccount,
    UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account service issuing bearer tokens.
pub struct AccountService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    lifetimes: TokenLifetimes,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> Clone for AccountService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            lifetimes: self.lifetimes,
        }
    }
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> AccountService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, lifetimes: TokenLifetimes) -> Self {
        Self {
            users,
            hasher,
            tokens,
            lifetimes,
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenCodec + ?Sized,
{
    /// Register a new account and issue a signup-lifetime token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthGrant, Error> {
        let credentials = Credentials::try_from_parts(email, password)?;
        let password_hash = self.hasher.hash(credentials.password()).map_err(|err| {
            error!(error = %err, "credential hashing failed");
            Error::internal("could not store credentials")
        })?;

        let account = self
            .users
            .create(&NewUserAccount {
                id: UserId::random(),
                email: credentials.email().clone(),
                password_hash,
            })
            .await?;
        debug!(user_id = %account.id(), "account created");

        self.grant(account, self.lifetimes.signup)
    }

    /// Verify credentials and issue a login-lifetime token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, Error> {
        let Ok(credentials) = Credentials::try_from_parts(email, password) else {
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };

        let Some(account) = self.users.find_by_email(credentials.email()).await? else {
            debug!("login rejected: unknown account");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };

        let valid = self
            .hasher
            .verify(account.password_hash(), credentials.password())
            .map_err(|err| {
                error!(user_id = %account.id(), error = %err, "stored credential unreadable");
                Error::internal("could not verify credentials")
            })?;
        if !valid {
            debug!(user_id = %account.id(), "login rejected: password mismatch");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }

        self.grant(account, self.lifetimes.login)
    }

    fn grant(&self, account: UserAccount, ttl: std::time::Duration) -> Result<AuthGrant, Error> {
        let token = self
            .tokens
            .sign(&AuthIdentity::from(&account), ttl)
            .map_err(|err| {
                error!(error = %err, "token signing failed");
                Error::internal("could not issue token")
            })?;
        Ok(AuthGrant { token, account })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockCredentialHasher, MockTokenCodec, MockUserRepository, RecordStoreError,
    };
    use crate::domain::{AccessToken, EmailAddress, ErrorCode};
    use rstest::rstest;

    type Service = AccountService<MockUserRepository, MockCredentialHasher, MockTokenCodec>;

    fn make_service(
        users: MockUserRepository,
        hasher: MockCredentialHasher,
        tokens: MockTokenCodec,
    ) -> Service {
        AccountService::new(
            Arc::new(users),
            Arc::new(hasher),
            Arc::new(tokens),
            TokenLifetimes::default(),
        )
    }

    fn stored_ada() -> UserAccount {
        let email = EmailAddress::new("ada@x.com").expect("email");
        UserAccount::new(UserId::random(), email, "$argon2id$stored")
    }

    fn token_for_ttl(expected_secs: u64) -> MockTokenCodec {
        let mut tokens = MockTokenCodec::new();
        tokens
            .expect_sign()
            .withf(move |identity, ttl| identity.email == "ada@x.com" && ttl.as_secs() == expected_secs)
            .times(1)
            .returning(|_, _| Ok(AccessToken::new("signed")));
        tokens
    }

    #[tokio::test]
    async fn signup_hashes_and_issues_two_hour_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|account| account.password_hash == "hashed" && account.email.as_ref() == "ada@x.com")
            .times(1)
            .returning(|account| Ok(UserAccount::from(account.clone())));
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == "s3cret")
            .returning(|_| Ok("hashed".to_owned()));

        let service = make_service(users, hasher, token_for_ttl(7200));
        let grant = service.signup("ada@x.com", "s3cret").await.expect("signup");
        assert_eq!(grant.token.as_str(), "signed");
        assert_eq!(grant.account.email().as_ref(), "ada@x.com");
    }

    #[tokio::test]
    async fn signup_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .return_once(|_| Err(RecordStoreError::duplicate("email")));
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().returning(|_| Ok("hashed".to_owned()));
        let mut tokens = MockTokenCodec::new();
        tokens.expect_sign().never();

        let service = make_service(users, hasher, tokens);
        let err = service.signup("ada@x.com", "pw").await.expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn signup_validates_before_touching_the_store() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().never();

        let service = make_service(users, hasher, MockTokenCodec::new());
        let err = service.signup("not-an-email", "pw").await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn login_issues_one_hour_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .return_once(|_| Ok(Some(stored_ada())));
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_verify()
            .withf(|stored, supplied| stored == "$argon2id$stored" && supplied == "s3cret")
            .returning(|_, _| Ok(true));

        let service = make_service(users, hasher, token_for_ttl(3600));
        let grant = service.login("ada@x.com", "s3cret").await.expect("login");
        assert_eq!(grant.token.as_str(), "signed");
    }

    #[rstest]
    #[case("ada@x.com", "wrong", true)]
    #[case("nobody@x.com", "s3cret", false)]
    #[case("nobody", "s3cret", false)]
    #[tokio::test]
    async fn login_failures_are_indistinguishable(
        #[case] email: &str,
        #[case] password: &str,
        #[case] account_exists: bool,
    ) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(account_exists.then(stored_ada)));
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(false));
        let mut tokens = MockTokenCodec::new();
        tokens.expect_sign().never();

        let service = make_service(users, hasher, tokens);
        let err = service.login(email, password).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidCredentials);
        assert_eq!(err.message(), "Invalid credentials");
        assert!(err.details().is_none());
    }
}
