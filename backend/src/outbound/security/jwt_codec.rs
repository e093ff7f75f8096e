//! HS256 JSON Web Tokens carrying `{ id, email }`.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{AccessToken, AuthIdentity, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec for JwtTokenCodec {
    fn sign(&self, identity: &AuthIdentity, ttl: Duration) -> Result<AccessToken, TokenError> {
        let iat = Utc::now().timestamp();
        let lifetime = i64::try_from(ttl.as_secs())
            .map_err(|_| TokenError::signing("token lifetime out of range"))?;
        let claims = Claims {
            id: identity.user_id.to_string(),
            email: identity.email.clone(),
            iat,
            exp: iat.saturating_add(lifetime),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                ErrorKind::InvalidSignature => TokenError::invalid_signature(),
                _ => TokenError::malformed(err.to_string()),
            }
        })?;
        let user_id = UserId::new(&data.claims.id)
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        Ok(AuthIdentity {
            user_id,
            email: data.claims.email,
        })
    }
}
