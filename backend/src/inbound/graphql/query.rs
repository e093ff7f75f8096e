//! Read-only root fields. None of these require an identity.

use async_graphql::{Context, ID, Object, ResultExt};

use crate::domain::{CourseListQuery, StudentListQuery};

use super::context::records;
use super::inputs::{CourseFilterInput, ListOptionsInput, StudentFilterInput, course_id, student_id};
use super::types::{CourseObject, StudentObject};

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn get_all_students(
        &self,
        ctx: &Context<'_>,
        filter: Option<StudentFilterInput>,
        options: Option<ListOptionsInput>,
    ) -> async_graphql::Result<Vec<StudentObject>> {
        let query = StudentListQuery::build(
            filter.unwrap_or_default().into(),
            options.unwrap_or_default().into(),
        )
        .extend()?;
        let students = records(ctx)?.list_students(&query).await.extend()?;
        Ok(students.into_iter().map(StudentObject).collect())
    }

    async fn get_student(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<StudentObject>> {
        let id = student_id(&id).extend()?;
        let student = records(ctx)?.student(id).await.extend()?;
        Ok(student.map(StudentObject))
    }

    async fn get_all_courses(
        &self,
        ctx: &Context<'_>,
        filter: Option<CourseFilterInput>,
        options: Option<ListOptionsInput>,
    ) -> async_graphql::Result<Vec<CourseObject>> {
        let query = CourseListQuery::build(
            filter.unwrap_or_default().into(),
            options.unwrap_or_default().into(),
        )
        .extend()?;
        let courses = records(ctx)?.list_courses(&query).await.extend()?;
        Ok(courses.into_iter().map(CourseObject).collect())
    }

    async fn get_course(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<CourseObject>> {
        let id = course_id(&id).extend()?;
        let course = records(ctx)?.course(id).await.extend()?;
        Ok(course.map(CourseObject))
    }
}
