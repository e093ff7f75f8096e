//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod course_repository;
mod credential_hasher;
mod store_error;
mod student_repository;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::CourseRepository;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use store_error::RecordStoreError;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::StudentRepository;
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
