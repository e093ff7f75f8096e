//! Port abstraction for course persistence.
use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseListQuery, CoursePatch, NewCourse, StudentId};

use super::RecordStoreError;

/// Course store operations; the mirror image of
/// [`StudentRepository`](super::StudentRepository).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &NewCourse) -> Result<Course, RecordStoreError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, RecordStoreError>;

    /// Fetch every existing course among `ids`, preserving their order.
    async fn find_many_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, RecordStoreError>;

    async fn list(&self, query: &CourseListQuery) -> Result<Vec<Course>, RecordStoreError>;

    async fn update(
        &self,
        id: CourseId,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, RecordStoreError>;

    async fn delete(&self, id: CourseId) -> Result<bool, RecordStoreError>;

    /// Set-add `student` to the course roster.
    async fn add_student(&self, id: CourseId, student: StudentId)
    -> Result<bool, RecordStoreError>;

    /// Set-remove `student` from the course roster.
    async fn remove_student(
        &self,
        id: CourseId,
        student: StudentId,
    ) -> Result<bool, RecordStoreError>;

    /// Remove `student` from every roster holding it.
    async fn pull_student_from_all(&self, student: StudentId) -> Result<u64, RecordStoreError>;
}
