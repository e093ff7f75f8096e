//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Async pooling**: `bb8` pools of `diesel-async` connections.
//! - **Relationship arrays**: `students.course_ids` and `courses.student_ids`
//!   are `uuid[]` columns updated with guarded `array_append` and
//!   `array_remove`.
//!
//! # Example
//!
//! ```ignore
//! use registrar::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registrar")).await?;
//! let students = DieselStudentRepository::new(pool);
//! ```

mod diesel_course_repository;
mod diesel_student_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;
mod sql_functions;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
