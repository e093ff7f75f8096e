//! Services and per-request data made available to resolvers.

use std::sync::Arc;

use async_graphql::Context;

use crate::domain::ports::{
    CourseRepository, CredentialHasher, StudentRepository, TokenCodec, UserRepository,
};
use crate::domain::{
    AccountService, EnrollmentService, RecordsService, RequestIdentity, TokenLifetimes,
};

/// Record reads and writes over trait-object repositories.
pub type DynRecordsService = RecordsService<dyn StudentRepository, dyn CourseRepository>;

/// Enrolment and cascading deletes over trait-object repositories.
pub type DynEnrollmentService = EnrollmentService<dyn StudentRepository, dyn CourseRepository>;

/// Signup and login over trait-object adapters.
pub type DynAccountService = AccountService<dyn UserRepository, dyn CredentialHasher, dyn TokenCodec>;

/// Domain services shared by every request.
#[derive(Clone)]
pub struct GraphQlServices {
    pub records: DynRecordsService,
    pub enrollment: DynEnrollmentService,
    pub accounts: DynAccountService,
}

/// Ports backing [`GraphQlServices`].
#[derive(Clone)]
pub struct ServicePorts {
    pub students: Arc<dyn StudentRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub tokens: Arc<dyn TokenCodec>,
}

impl GraphQlServices {
    /// Wire the domain services over one set of adapters.
    pub fn new(ports: ServicePorts, lifetimes: TokenLifetimes) -> Self {
        let ServicePorts {
            students,
            courses,
            users,
            hasher,
            tokens,
        } = ports;
        Self {
            records: RecordsService::new(students.clone(), courses.clone()),
            enrollment: EnrollmentService::new(students, courses),
            accounts: AccountService::new(users, hasher, tokens, lifetimes),
        }
    }
}

pub(crate) fn records<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a DynRecordsService> {
    ctx.data::<DynRecordsService>()
}

pub(crate) fn enrollment<'a>(
    ctx: &Context<'a>,
) -> async_graphql::Result<&'a DynEnrollmentService> {
    ctx.data::<DynEnrollmentService>()
}

pub(crate) fn accounts<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a DynAccountService> {
    ctx.data::<DynAccountService>()
}

/// Identity attached by the HTTP adapter; absent data means anonymous.
pub(crate) fn identity(ctx: &Context<'_>) -> RequestIdentity {
    ctx.data_opt::<RequestIdentity>()
        .cloned()
        .unwrap_or_default()
}
