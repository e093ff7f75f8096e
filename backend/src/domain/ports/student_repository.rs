//! Port abstraction for student persistence.
use async_trait::async_trait;

use crate::domain::{CourseId, NewStudent, Student, StudentId, StudentListQuery, StudentPatch};

use super::RecordStoreError;

/// Student store operations, including the set-style updates of
/// `Student.course_ids` used by the enrolment protocol.
///
/// Set updates against a missing student are a no-op reported as `false`,
/// never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new student, allocating its id. Fails with `Duplicate` when
    /// the email is taken.
    async fn create(&self, student: &NewStudent) -> Result<Student, RecordStoreError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RecordStoreError>;

    /// Fetch every existing student among `ids`, preserving the order of
    /// `ids` and skipping dangling ones.
    async fn find_many_by_ids(&self, ids: &[StudentId])
    -> Result<Vec<Student>, RecordStoreError>;

    async fn list(&self, query: &StudentListQuery) -> Result<Vec<Student>, RecordStoreError>;

    /// Apply a patch, returning the updated record or `None` if missing.
    async fn update(
        &self,
        id: StudentId,
        patch: &StudentPatch,
    ) -> Result<Option<Student>, RecordStoreError>;

    /// Remove a student. Returns whether a record was deleted.
    async fn delete(&self, id: StudentId) -> Result<bool, RecordStoreError>;

    /// Set-add `course` to the student's course list.
    async fn add_course(&self, id: StudentId, course: CourseId)
    -> Result<bool, RecordStoreError>;

    /// Set-remove `course` from the student's course list.
    async fn remove_course(
        &self,
        id: StudentId,
        course: CourseId,
    ) -> Result<bool, RecordStoreError>;

    /// Remove `course` from every student holding it. Returns how many
    /// records changed.
    async fn pull_course_from_all(&self, course: CourseId) -> Result<u64, RecordStoreError>;
}
