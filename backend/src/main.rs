//! Registrar entry-point: loads settings, prepares the record store and serves
//! the GraphQL API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registrar::inbound::http::health::HealthState;
use registrar::outbound::persistence::{DbPool, run_migrations};
use registrar::settings::RegistrarSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RegistrarSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(
        bind_addr,
        settings.jwt_secret()?,
        settings.token_lifetimes()?,
    );

    if let Some(pool_config) = settings.pool_config() {
        run_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "registrar listening");
    server.await.wrap_err("server terminated with an error")
}
