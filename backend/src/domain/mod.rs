//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed records, the validated inputs that create
//! and change them, and the services that keep the student/course
//! relationship consistent. Nothing here knows about HTTP, GraphQL or a
//! particular database.
//!
//! Public surface:
//! - Error / ErrorCode: error payload shared by every adapter.
//! - Student / Course / UserAccount: records and their inputs.
//! - StudentListQuery / CourseListQuery: normalised list queries.
//! - RecordsService / EnrollmentService / AccountService: use cases.
//! - IdentityResolver / RequestIdentity: the per-request auth gate.

pub mod error;
pub mod ports;

mod account_service;
mod auth;
mod course;
mod email;
mod enrollment_service;
mod identifier;
mod identity_resolver;
mod listing;
mod records_service;
mod student;
mod trace_id;
mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, AuthGrant, AuthIdentity, Credentials, CredentialsValidationError,
    RequestIdentity, TokenLifetimes,
};
pub use self::course::{Course, CourseDraft, CoursePatch, CourseValidationError, NewCourse};
pub use self::email::{EmailAddress, EmailValidationError};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{CourseId, IdentifierError, StudentId, UserId};
pub use self::identity_resolver::IdentityResolver;
pub use self::listing::{
    CourseFilter, CourseListQuery, CourseSort, CourseSortKey, ListOptions, Sort, StudentFilter,
    StudentListQuery, StudentSort, StudentSortKey,
};
pub use self::records_service::RecordsService;
pub use self::student::{
    NewStudent, Student, StudentDraft, StudentPatch, StudentValidationError,
};
pub use self::trace_id::TraceId;
pub use self::user::{NewUserAccount, UserAccount};
