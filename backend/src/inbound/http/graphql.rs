//! GraphQL endpoint.
//!
//! ```text
//! POST /graphql
//! Authorization: Bearer <token>
//! {"query":"mutation { deleteCourse(id: \"...\") }"}
//! ```
//!
//! The bearer credential is resolved once here and handed to the schema as
//! request data. A missing or unusable credential yields an anonymous
//! request; only guarded mutations then fail.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use async_graphql::http::GraphiQLSource;
use tracing::debug;

use super::cache_control::private_no_store_header;
use super::state::GraphQlState;

/// Path the schema is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Execute one GraphQL operation.
#[post("/graphql")]
pub async fn execute(
    state: web::Data<GraphQlState>,
    req: HttpRequest,
    payload: web::Json<async_graphql::Request>,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let identity = state.identities.resolve(authorization);
    debug!(
        authenticated = identity.is_authenticated(),
        operation = payload.operation_name.as_deref(),
        "executing graphql request"
    );

    let response = state
        .schema
        .execute(payload.into_inner().data(identity))
        .await;
    HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(response)
}

/// Interactive GraphiQL explorer for local development.
#[get("/graphql")]
pub async fn playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[cfg(test)]
#[path = "graphql_tests.rs"]
mod tests;
