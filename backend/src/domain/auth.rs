//! Authentication primitives: credentials, identities and token lifetimes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a resolver talks to a service.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use super::{EmailAddress, EmailValidationError, Error, UserAccount, UserId};

/// Domain error returned when signup or login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or did not look like an address.
    Email(EmailValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<CredentialsValidationError> for Error {
    fn from(value: CredentialsValidationError) -> Self {
        let field = match value {
            CredentialsValidationError::Email(_) => "email",
            CredentialsValidationError::EmptyPassword => "password",
        };
        Error::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Email plus password as supplied by a caller.
///
/// ## Invariants
/// - `email` is trimmed and matches the address pattern.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use registrar::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("ada@x.com", "s3cret").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@x.com");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = EmailAddress::new(email).map_err(CredentialsValidationError::Email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity embedded in a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub user_id: UserId,
    pub email: String,
}

impl From<&UserAccount> for AuthIdentity {
    fn from(account: &UserAccount) -> Self {
        Self {
            user_id: account.id(),
            email: account.email().to_string(),
        }
    }
}

/// Who is making the current request, resolved once per request.
///
/// Guarded operations take this explicitly instead of looking up ambient
/// request state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestIdentity {
    Authenticated(AuthIdentity),
    #[default]
    Anonymous,
}

impl RequestIdentity {
    /// Return the identity or fail with `unauthenticated`.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::{ErrorCode, RequestIdentity};
    ///
    /// let err = RequestIdentity::Anonymous.require().expect_err("anonymous");
    /// assert_eq!(err.code(), ErrorCode::Unauthenticated);
    /// ```
    pub fn require(&self) -> Result<&AuthIdentity, Error> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Anonymous => Err(Error::unauthenticated("UNAUTHENTICATED")),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Validity windows for issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub signup: Duration,
    pub login: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            signup: Duration::from_secs(2 * 60 * 60),
            login: Duration::from_secs(60 * 60),
        }
    }
}

/// Signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub token: AccessToken,
    pub account: UserAccount,
}
