//! Builders selecting the adapters behind the GraphQL state.

use std::sync::Arc;

use tracing::info;

use registrar::inbound::graphql::ServicePorts;
use registrar::inbound::http::state::GraphQlState;
use registrar::outbound::memory::MemoryRecordStore;
use registrar::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselStudentRepository, DieselUserRepository,
};
use registrar::outbound::security::{Argon2CredentialHasher, JwtTokenCodec};

use super::ServerConfig;

fn postgres_ports(pool: &DbPool, tokens: Arc<JwtTokenCodec>) -> ServicePorts {
    ServicePorts {
        students: Arc::new(DieselStudentRepository::new(pool.clone())),
        courses: Arc::new(DieselCourseRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        hasher: Arc::new(Argon2CredentialHasher),
        tokens,
    }
}

fn memory_ports(tokens: Arc<JwtTokenCodec>) -> ServicePorts {
    let store = Arc::new(MemoryRecordStore::new());
    ServicePorts {
        students: store.clone(),
        courses: store.clone(),
        users: store,
        hasher: Arc::new(Argon2CredentialHasher),
        tokens,
    }
}

/// Build the GraphQL state, using PostgreSQL when a pool is configured and
/// the in-memory store otherwise.
pub(super) fn build_graphql_state(config: &ServerConfig) -> GraphQlState {
    let tokens = Arc::new(JwtTokenCodec::new(&config.jwt_secret));
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL record store");
            postgres_ports(pool, tokens)
        }
        None => {
            info!("using in-memory record store; data is lost on restart");
            memory_ports(tokens)
        }
    };
    GraphQlState::from_ports(ports, config.lifetimes)
}
