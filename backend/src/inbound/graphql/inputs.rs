//! Input object types and their conversion into validated domain values.

use async_graphql::{ID, InputObject};

use crate::domain::{
    CourseFilter, CourseId, CoursePatch, Error, ListOptions, StudentFilter, StudentId,
    StudentPatch,
};

#[derive(Debug, Default, InputObject)]
#[graphql(name = "StudentUpdateInput")]
pub struct StudentUpdateInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub major: Option<String>,
}

impl TryFrom<StudentUpdateInput> for StudentPatch {
    type Error = Error;

    fn try_from(input: StudentUpdateInput) -> Result<Self, Self::Error> {
        Ok(StudentPatch::try_new(
            input.name,
            input.email.as_deref(),
            input.age,
            input.major,
        )?)
    }
}

#[derive(Debug, Default, InputObject)]
#[graphql(name = "CourseUpdateInput")]
pub struct CourseUpdateInput {
    pub title: Option<String>,
    pub code: Option<String>,
    pub credits: Option<i32>,
    pub instructor: Option<String>,
}

impl TryFrom<CourseUpdateInput> for CoursePatch {
    type Error = Error;

    fn try_from(input: CourseUpdateInput) -> Result<Self, Self::Error> {
        Ok(CoursePatch::try_new(
            input.title,
            input.code,
            input.credits,
            input.instructor,
        )?)
    }
}

/// Paging and sorting. `limit` defaults to 10 and is capped at 50;
/// `sortOrder` is descending only when exactly `"DESC"`.
#[derive(Debug, Default, InputObject)]
#[graphql(name = "ListOptions")]
pub struct ListOptionsInput {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl From<ListOptionsInput> for ListOptions {
    fn from(input: ListOptionsInput) -> Self {
        Self {
            limit: input.limit.map(i64::from),
            offset: input.offset.map(i64::from),
            sort_by: input.sort_by,
            sort_order: input.sort_order,
        }
    }
}

#[derive(Debug, Default, InputObject)]
#[graphql(name = "StudentFilter")]
pub struct StudentFilterInput {
    pub major: Option<String>,
    pub name_contains: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl From<StudentFilterInput> for StudentFilter {
    fn from(input: StudentFilterInput) -> Self {
        Self {
            major: input.major,
            name_contains: input.name_contains,
            min_age: input.min_age,
            max_age: input.max_age,
        }
    }
}

#[derive(Debug, Default, InputObject)]
#[graphql(name = "CourseFilter")]
pub struct CourseFilterInput {
    pub code_prefix: Option<String>,
    pub title_contains: Option<String>,
    pub instructor: Option<String>,
    pub min_credits: Option<i32>,
    pub max_credits: Option<i32>,
}

impl From<CourseFilterInput> for CourseFilter {
    fn from(input: CourseFilterInput) -> Self {
        Self {
            code_prefix: input.code_prefix,
            title_contains: input.title_contains,
            instructor: input.instructor,
            min_credits: input.min_credits,
            max_credits: input.max_credits,
        }
    }
}

pub(crate) fn student_id(id: &ID) -> Result<StudentId, Error> {
    Ok(StudentId::new(id.as_str())?)
}

pub(crate) fn course_id(id: &ID) -> Result<CourseId, Error> {
    Ok(CourseId::new(id.as_str())?)
}
