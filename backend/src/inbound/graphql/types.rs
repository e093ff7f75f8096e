//! Output object types.
//!
//! Records are wrapped rather than derived so relationship fields can be
//! resolved lazily through the records service.

use async_graphql::{Context, ID, Object, ResultExt, SimpleObject};

use crate::domain::{AuthGrant, Course, Student, UserAccount};

use super::context::records;

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// A student and, lazily, the courses they are enrolled in.
pub struct StudentObject(pub Student);

#[Object(name = "Student")]
impl StudentObject {
    async fn id(&self) -> ID {
        ID(self.0.id().to_string())
    }

    async fn name(&self) -> &str {
        self.0.name()
    }

    async fn email(&self) -> &str {
        self.0.email().as_ref()
    }

    async fn age(&self) -> i32 {
        self.0.age()
    }

    async fn major(&self) -> Option<&str> {
        self.0.major()
    }

    async fn courses(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<CourseObject>> {
        let courses = records(ctx)?.courses_of(&self.0).await.extend()?;
        Ok(courses.into_iter().map(CourseObject).collect())
    }

    /// Number of courses that resolve to existing records.
    async fn courses_count(&self, ctx: &Context<'_>) -> async_graphql::Result<i32> {
        let courses = records(ctx)?.courses_of(&self.0).await.extend()?;
        Ok(count(courses.len()))
    }
}

/// A course and, lazily, its enrolled students.
pub struct CourseObject(pub Course);

#[Object(name = "Course")]
impl CourseObject {
    async fn id(&self) -> ID {
        ID(self.0.id().to_string())
    }

    async fn title(&self) -> &str {
        self.0.title()
    }

    async fn code(&self) -> &str {
        self.0.code()
    }

    async fn credits(&self) -> i32 {
        self.0.credits()
    }

    async fn instructor(&self) -> &str {
        self.0.instructor()
    }

    async fn students(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<StudentObject>> {
        let students = records(ctx)?.students_of(&self.0).await.extend()?;
        Ok(students.into_iter().map(StudentObject).collect())
    }

    /// Number of enrolled students that resolve to existing records.
    async fn students_count(&self, ctx: &Context<'_>) -> async_graphql::Result<i32> {
        let students = records(ctx)?.students_of(&self.0).await.extend()?;
        Ok(count(students.len()))
    }
}

/// Public view of an account. The password hash never leaves the domain.
#[derive(SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub email: String,
}

impl From<&UserAccount> for UserObject {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: ID(account.id().to_string()),
            email: account.email().to_string(),
        }
    }
}

#[derive(SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserObject,
}

impl From<AuthGrant> for AuthPayload {
    fn from(grant: AuthGrant) -> Self {
        let user = UserObject::from(&grant.account);
        Self {
            token: grant.token.into_inner(),
            user,
        }
    }
}
