//! Mutation root fields.
//!
//! `signup` and `login` are open. Every other mutation passes the request
//! identity to its service, which rejects anonymous callers before any store
//! write. Ids and inputs are validated first, so a malformed request reports
//! `invalid_request` regardless of identity.

use async_graphql::{Context, ID, Object, ResultExt};

use crate::domain::{CoursePatch, Error, NewCourse, NewStudent, StudentPatch};

use super::context::{accounts, enrollment, identity, records};
use super::inputs::{self, CourseUpdateInput, StudentUpdateInput};
use super::types::{AuthPayload, CourseObject, StudentObject};

#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<AuthPayload> {
        let grant = accounts(ctx)?.signup(&email, &password).await.extend()?;
        Ok(grant.into())
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<AuthPayload> {
        let grant = accounts(ctx)?.login(&email, &password).await.extend()?;
        Ok(grant.into())
    }

    async fn add_student(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        age: i32,
        major: Option<String>,
    ) -> async_graphql::Result<StudentObject> {
        let student = NewStudent::try_new(name, &email, age, major)
            .map_err(Error::from)
            .extend()?;
        let created = records(ctx)?
            .add_student(&identity(ctx), student)
            .await
            .extend()?;
        Ok(StudentObject(created))
    }

    async fn update_student(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: StudentUpdateInput,
    ) -> async_graphql::Result<StudentObject> {
        let id = inputs::student_id(&id).extend()?;
        let patch = StudentPatch::try_from(input).extend()?;
        let updated = records(ctx)?
            .update_student(&identity(ctx), id, patch)
            .await
            .extend()?;
        Ok(StudentObject(updated))
    }

    async fn delete_student(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let id = inputs::student_id(&id).extend()?;
        enrollment(ctx)?
            .delete_student(&identity(ctx), id)
            .await
            .extend()
    }

    async fn add_course(
        &self,
        ctx: &Context<'_>,
        title: String,
        code: String,
        credits: i32,
        instructor: String,
    ) -> async_graphql::Result<CourseObject> {
        let course = NewCourse::try_new(title, code, credits, instructor)
            .map_err(Error::from)
            .extend()?;
        let created = records(ctx)?
            .add_course(&identity(ctx), course)
            .await
            .extend()?;
        Ok(CourseObject(created))
    }

    async fn update_course(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: CourseUpdateInput,
    ) -> async_graphql::Result<CourseObject> {
        let id = inputs::course_id(&id).extend()?;
        let patch = CoursePatch::try_from(input).extend()?;
        let updated = records(ctx)?
            .update_course(&identity(ctx), id, patch)
            .await
            .extend()?;
        Ok(CourseObject(updated))
    }

    async fn delete_course(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let id = inputs::course_id(&id).extend()?;
        enrollment(ctx)?
            .delete_course(&identity(ctx), id)
            .await
            .extend()
    }

    async fn enroll_student(
        &self,
        ctx: &Context<'_>,
        student_id: ID,
        course_id: ID,
    ) -> async_graphql::Result<StudentObject> {
        let (student, course) = (
            inputs::student_id(&student_id).extend()?,
            inputs::course_id(&course_id).extend()?,
        );
        let enrolled = enrollment(ctx)?
            .enroll(&identity(ctx), student, course)
            .await
            .extend()?;
        Ok(StudentObject(enrolled))
    }

    async fn unenroll_student(
        &self,
        ctx: &Context<'_>,
        student_id: ID,
        course_id: ID,
    ) -> async_graphql::Result<StudentObject> {
        let (student, course) = (
            inputs::student_id(&student_id).extend()?,
            inputs::course_id(&course_id).extend()?,
        );
        let remaining = enrollment(ctx)?
            .unenroll(&identity(ctx), student, course)
            .await
            .extend()?;
        Ok(StudentObject(remaining))
    }
}
