//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::TokenCodec;
use crate::domain::{AuthIdentity, TokenLifetimes, UserId};
use crate::inbound::graphql::ServicePorts;
use crate::outbound::memory::MemoryRecordStore;
use crate::outbound::security::{Argon2CredentialHasher, JwtTokenCodec};

use super::state::GraphQlState;

pub const TEST_SECRET: &[u8] = b"registrar-test-secret";

/// GraphQL state over a fresh in-memory store.
pub fn memory_state() -> GraphQlState {
    let store = Arc::new(MemoryRecordStore::new());
    GraphQlState::from_ports(
        ServicePorts {
            students: store.clone(),
            courses: store.clone(),
            users: store,
            hasher: Arc::new(Argon2CredentialHasher),
            tokens: Arc::new(JwtTokenCodec::new(TEST_SECRET)),
        },
        TokenLifetimes::default(),
    )
}

/// Bearer token accepted by [`memory_state`].
pub fn bearer_token() -> String {
    let identity = AuthIdentity {
        user_id: UserId::random(),
        email: "registrar@example.edu".to_owned(),
    };
    let token = JwtTokenCodec::new(TEST_SECRET)
        .sign(&identity, Duration::from_secs(60))
        .expect("sign test token");
    format!("Bearer {}", token.as_str())
}
