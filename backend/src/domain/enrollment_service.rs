//! Enrolment and deletion: the two-sided relationship maintainer.
//!
//! `Student.course_ids` and `Course.student_ids` mirror each other. Every
//! operation here issues one write per side, awaiting each before the next,
//! with no transaction around them. Between the two writes a concurrent
//! reader may see one side updated and not the other; across concurrent
//! operations on the same pair the final state is whichever write landed
//! last.
//!
//! Deletes always clean up back-references first and only then remove the
//! primary record, so a dangling reference can only be observed while the
//! record itself still exists.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{CourseRepository, StudentRepository};
use crate::domain::{CourseId, Error, RequestIdentity, Student, StudentId};

/// Relationship-maintaining operations over both repositories.
pub struct EnrollmentService<S: ?Sized, C: ?Sized> {
    students: Arc<S>,
    courses: Arc<C>,
}

impl<S: ?Sized, C: ?Sized> Clone for EnrollmentService<S, C> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
            courses: Arc::clone(&self.courses),
        }
    }
}

impl<S: ?Sized, C: ?Sized> EnrollmentService<S, C> {
    pub fn new(students: Arc<S>, courses: Arc<C>) -> Self {
        Self { students, courses }
    }
}

impl<S, C> EnrollmentService<S, C>
where
    S: StudentRepository + ?Sized,
    C: CourseRepository + ?Sized,
{
    /// Set-add the course to the student and the student to the course, then
    /// read the student back.
    ///
    /// A missing student or course makes its own write a no-op; the read-back
    /// fails with `not_found` only when the student is absent.
    pub async fn enroll(
        &self,
        identity: &RequestIdentity,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Student, Error> {
        identity.require()?;

        let student_changed = self.students.add_course(student_id, course_id).await?;
        let course_changed = self.courses.add_student(course_id, student_id).await?;
        debug!(
            %student_id,
            %course_id,
            student_changed,
            course_changed,
            "enrolled student"
        );

        self.read_back(student_id).await
    }

    /// Set-remove both sides of the pair, then read the student back.
    pub async fn unenroll(
        &self,
        identity: &RequestIdentity,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Student, Error> {
        identity.require()?;

        let student_changed = self.students.remove_course(student_id, course_id).await?;
        let course_changed = self.courses.remove_student(course_id, student_id).await?;
        debug!(
            %student_id,
            %course_id,
            student_changed,
            course_changed,
            "unenrolled student"
        );

        self.read_back(student_id).await
    }

    /// Pull the student from every roster, then delete it.
    ///
    /// Always returns `true`; deleting an unknown id is a no-op.
    pub async fn delete_student(
        &self,
        identity: &RequestIdentity,
        student_id: StudentId,
    ) -> Result<bool, Error> {
        identity.require()?;

        let rosters = self.courses.pull_student_from_all(student_id).await?;
        let deleted = self.students.delete(student_id).await?;
        debug!(%student_id, rosters, deleted, "deleted student");
        Ok(true)
    }

    /// Pull the course from every student, then delete it.
    ///
    /// Always returns `true`; deleting an unknown id is a no-op.
    pub async fn delete_course(
        &self,
        identity: &RequestIdentity,
        course_id: CourseId,
    ) -> Result<bool, Error> {
        identity.require()?;

        let students = self.students.pull_course_from_all(course_id).await?;
        let deleted = self.courses.delete(course_id).await?;
        debug!(%course_id, students, deleted, "deleted course");
        Ok(true)
    }

    async fn read_back(&self, student_id: StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("student {student_id} not found")))
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
