//! Resolve the caller's identity from an `Authorization` header value.

use std::sync::Arc;

use tracing::debug;

use crate::domain::RequestIdentity;
use crate::domain::ports::TokenCodec;

/// Turns bearer credentials into a [`RequestIdentity`].
///
/// Resolution never fails: a missing header, a malformed or expired token,
/// or a bad signature all yield [`RequestIdentity::Anonymous`].
pub struct IdentityResolver<T: ?Sized> {
    tokens: Arc<T>,
}

impl<T: ?Sized> Clone for IdentityResolver<T> {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<T: TokenCodec + ?Sized> IdentityResolver<T> {
    pub fn new(tokens: Arc<T>) -> Self {
        Self { tokens }
    }

    /// Resolve the raw header value. A `Bearer ` prefix is optional.
    pub fn resolve(&self, authorization: Option<&str>) -> RequestIdentity {
        let Some(raw) = authorization.map(str::trim) else {
            return RequestIdentity::Anonymous;
        };
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        if token.is_empty() {
            return RequestIdentity::Anonymous;
        }

        match self.tokens.verify(token) {
            Ok(identity) => RequestIdentity::Authenticated(identity),
            Err(err) => {
                debug!(reason = %err, "bearer token rejected; treating request as anonymous");
                RequestIdentity::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockTokenCodec, TokenError};
    use crate::domain::{AuthIdentity, UserId};
    use rstest::rstest;

    fn ada() -> AuthIdentity {
        AuthIdentity {
            user_id: UserId::random(),
            email: "ada@x.com".to_owned(),
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("Bearer "))]
    #[case(Some("   "))]
    fn missing_tokens_never_reach_the_codec(#[case] header: Option<&str>) {
        let mut tokens = MockTokenCodec::new();
        tokens.expect_verify().never();
        let resolver = IdentityResolver::new(Arc::new(tokens));
        assert_eq!(resolver.resolve(header), RequestIdentity::Anonymous);
    }

    #[rstest]
    #[case("Bearer good-token")]
    #[case("good-token")]
    fn strips_optional_bearer_prefix(#[case] header: &str) {
        let identity = ada();
        let expected = identity.clone();
        let mut tokens = MockTokenCodec::new();
        tokens
            .expect_verify()
            .withf(|token| token == "good-token")
            .return_once(move |_| Ok(identity));
        let resolver = IdentityResolver::new(Arc::new(tokens));
        assert_eq!(
            resolver.resolve(Some(header)),
            RequestIdentity::Authenticated(expected)
        );
    }

    #[rstest]
    #[case(TokenError::expired())]
    #[case(TokenError::invalid_signature())]
    #[case(TokenError::malformed("not base64"))]
    fn verification_failures_degrade_to_anonymous(#[case] failure: TokenError) {
        let mut tokens = MockTokenCodec::new();
        tokens.expect_verify().return_once(move |_| Err(failure));
        let resolver = IdentityResolver::new(Arc::new(tokens));
        assert_eq!(
            resolver.resolve(Some("Bearer stale")),
            RequestIdentity::Anonymous
        );
    }
}
