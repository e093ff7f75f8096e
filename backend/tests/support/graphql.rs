//! Shared harness for end-to-end GraphQL tests over the in-memory store.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use registrar::Trace;
use registrar::domain::ports::TokenCodec;
use registrar::domain::{AuthIdentity, TokenLifetimes, UserId};
use registrar::inbound::graphql::ServicePorts;
use registrar::inbound::http::error::json_error_handler;
use registrar::inbound::http::graphql::{GRAPHQL_PATH, execute};
use registrar::inbound::http::state::GraphQlState;
use registrar::outbound::memory::MemoryRecordStore;
use registrar::outbound::security::{Argon2CredentialHasher, JwtTokenCodec};

const SECRET: &[u8] = b"registrar-integration-secret";

/// A memory-backed service plus direct access to its store.
pub struct Harness {
    pub store: Arc<MemoryRecordStore>,
    state: web::Data<GraphQlState>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryRecordStore::new());
        let state = GraphQlState::from_ports(
            ServicePorts {
                students: store.clone(),
                courses: store.clone(),
                users: store.clone(),
                hasher: Arc::new(Argon2CredentialHasher),
                tokens: Arc::new(JwtTokenCodec::new(SECRET)),
            },
            TokenLifetimes::default(),
        );
        Self {
            store,
            state: web::Data::new(state),
        }
    }

    /// A bearer header accepted by this harness without going through signup.
    pub fn bearer(&self) -> String {
        let identity = AuthIdentity {
            user_id: UserId::random(),
            email: "registrar@example.edu".to_owned(),
        };
        let token = JwtTokenCodec::new(SECRET)
            .sign(&identity, Duration::from_secs(300))
            .expect("sign test token");
        format!("Bearer {}", token.as_str())
    }

    /// Execute `query` and return the decoded GraphQL response.
    pub async fn run(&self, query: &str, variables: Value, authorization: Option<&str>) -> Value {
        let app = test::init_service(
            App::new()
                .app_data(self.state.clone())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .wrap(Trace)
                .service(execute),
        )
        .await;
        let mut req = test::TestRequest::post()
            .uri(GRAPHQL_PATH)
            .set_json(json!({ "query": query, "variables": variables }));
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        assert!(res.status().is_success(), "status {}", res.status());
        test::read_body_json(res).await
    }

    /// Execute as an authenticated caller and fail on any GraphQL error.
    pub async fn run_ok(&self, query: &str, variables: Value) -> Value {
        let token = self.bearer();
        let body = self.run(query, variables, Some(&token)).await;
        assert!(body.get("errors").is_none(), "unexpected errors: {body}");
        body["data"].clone()
    }

    pub async fn add_student(&self, name: &str, email: &str, age: i32) -> String {
        let data = self
            .run_ok(
                "mutation($name: String!, $email: String!, $age: Int!) {
                    addStudent(name: $name, email: $email, age: $age) { id }
                }",
                json!({ "name": name, "email": email, "age": age }),
            )
            .await;
        id_of(&data["addStudent"])
    }

    pub async fn add_course(&self, title: &str, code: &str, credits: i32, instructor: &str) -> String {
        let data = self
            .run_ok(
                "mutation($title: String!, $code: String!, $credits: Int!, $instructor: String!) {
                    addCourse(title: $title, code: $code, credits: $credits, instructor: $instructor) { id }
                }",
                json!({ "title": title, "code": code, "credits": credits, "instructor": instructor }),
            )
            .await;
        id_of(&data["addCourse"])
    }

    pub async fn enroll(&self, student: &str, course: &str) -> Value {
        let data = self
            .run_ok(
                "mutation($s: ID!, $c: ID!) {
                    enrollStudent(studentId: $s, courseId: $c) { id coursesCount courses { id } }
                }",
                json!({ "s": student, "c": course }),
            )
            .await;
        data["enrollStudent"].clone()
    }

    pub async fn student(&self, id: &str) -> Value {
        let body = self
            .run(
                "query($id: ID!) { getStudent(id: $id) { id name coursesCount courses { id code } } }",
                json!({ "id": id }),
                None,
            )
            .await;
        body["data"]["getStudent"].clone()
    }

    pub async fn course(&self, id: &str) -> Value {
        let body = self
            .run(
                "query($id: ID!) { getCourse(id: $id) { id studentsCount students { id name } } }",
                json!({ "id": id }),
                None,
            )
            .await;
        body["data"]["getCourse"].clone()
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id is a string").to_owned()
}

/// Ids of a list of objects, in response order.
pub fn ids(values: &Value) -> Vec<String> {
    values
        .as_array()
        .expect("array")
        .iter()
        .map(id_of)
        .collect()
}

/// First error's `extensions.code`.
pub fn error_code(body: &Value) -> &str {
    body["errors"][0]["extensions"]["code"]
        .as_str()
        .expect("error code present")
}
