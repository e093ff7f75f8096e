//! Token signing and password hashing adapters.

mod argon2_hasher;
mod jwt_codec;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt_codec::JwtTokenCodec;
