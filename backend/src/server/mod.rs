//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_graphql_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use registrar::Trace;
use registrar::inbound::http::error::json_error_handler;
use registrar::inbound::http::graphql;
use registrar::inbound::http::health::{HealthState, live, ready};
use registrar::inbound::http::state::GraphQlState;

/// GraphQL request bodies larger than this are rejected.
const MAX_REQUEST_BYTES: usize = 256 * 1024;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    graphql_state: web::Data<GraphQlState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        graphql_state,
    } = deps;

    let json_config = web::JsonConfig::default()
        .limit(MAX_REQUEST_BYTES)
        .error_handler(json_error_handler);

    let app = App::new()
        .app_data(health_state)
        .app_data(graphql_state)
        .app_data(json_config)
        .wrap(Trace)
        .service(graphql::execute)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(graphql::playground);
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let graphql_state = web::Data::new(build_graphql_state(&config));
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            graphql_state: graphql_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
