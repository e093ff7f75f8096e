//! Student and course CRUD plus relationship reads.
//!
//! Writes are guarded by the request identity; reads are public.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{CourseRepository, StudentRepository};
use crate::domain::{
    Course, CourseId, CourseListQuery, CoursePatch, Error, NewCourse, NewStudent, RequestIdentity,
    Student, StudentId, StudentListQuery, StudentPatch,
};

/// Records service over the student and course repositories.
pub struct RecordsService<S: ?Sized, C: ?Sized> {
    students: Arc<S>,
    courses: Arc<C>,
}

impl<S: ?Sized, C: ?Sized> Clone for RecordsService<S, C> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
            courses: Arc::clone(&self.courses),
        }
    }
}

impl<S: ?Sized, C: ?Sized> RecordsService<S, C> {
    pub fn new(students: Arc<S>, courses: Arc<C>) -> Self {
        Self { students, courses }
    }
}

fn student_not_found(id: StudentId) -> Error {
    Error::not_found(format!("student {id} not found"))
}

fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("course {id} not found"))
}

impl<S, C> RecordsService<S, C>
where
    S: StudentRepository + ?Sized,
    C: CourseRepository + ?Sized,
{
    pub async fn add_student(
        &self,
        identity: &RequestIdentity,
        student: NewStudent,
    ) -> Result<Student, Error> {
        identity.require()?;
        let created = self.students.create(&student).await?;
        debug!(student_id = %created.id(), "created student");
        Ok(created)
    }

    /// Apply a partial update; fails with `not_found` for unknown ids.
    pub async fn update_student(
        &self,
        identity: &RequestIdentity,
        id: StudentId,
        patch: StudentPatch,
    ) -> Result<Student, Error> {
        identity.require()?;
        self.students
            .update(id, &patch)
            .await?
            .ok_or_else(|| student_not_found(id))
    }

    pub async fn add_course(
        &self,
        identity: &RequestIdentity,
        course: NewCourse,
    ) -> Result<Course, Error> {
        identity.require()?;
        let created = self.courses.create(&course).await?;
        debug!(course_id = %created.id(), "created course");
        Ok(created)
    }

    pub async fn update_course(
        &self,
        identity: &RequestIdentity,
        id: CourseId,
        patch: CoursePatch,
    ) -> Result<Course, Error> {
        identity.require()?;
        self.courses
            .update(id, &patch)
            .await?
            .ok_or_else(|| course_not_found(id))
    }

    pub async fn student(&self, id: StudentId) -> Result<Option<Student>, Error> {
        Ok(self.students.find_by_id(id).await?)
    }

    pub async fn course(&self, id: CourseId) -> Result<Option<Course>, Error> {
        Ok(self.courses.find_by_id(id).await?)
    }

    pub async fn list_students(&self, query: &StudentListQuery) -> Result<Vec<Student>, Error> {
        Ok(self.students.list(query).await?)
    }

    pub async fn list_courses(&self, query: &CourseListQuery) -> Result<Vec<Course>, Error> {
        Ok(self.courses.list(query).await?)
    }

    /// Resolve a student's course ids to records. Dangling ids are skipped.
    pub async fn courses_of(&self, student: &Student) -> Result<Vec<Course>, Error> {
        if student.course_ids().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.courses.find_many_by_ids(student.course_ids()).await?)
    }

    /// Resolve a course roster to records. Dangling ids are skipped.
    pub async fn students_of(&self, course: &Course) -> Result<Vec<Student>, Error> {
        if course.student_ids().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.students.find_many_by_ids(course.student_ids()).await?)
    }
}
