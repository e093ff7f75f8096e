//! Course records and their validated inputs.

use std::fmt;

use serde_json::json;

use super::{CourseId, Error, StudentId};

/// Validation errors raised by course inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    EmptyTitle,
    EmptyCode,
    EmptyInstructor,
}

impl CourseValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyCode => "code",
            Self::EmptyInstructor => "instructor",
        }
    }
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must not be empty", self.field())
    }
}

impl std::error::Error for CourseValidationError {}

impl From<CourseValidationError> for Error {
    fn from(value: CourseValidationError) -> Self {
        let field = value.field();
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": field, "code": format!("empty_{field}") }))
    }
}

fn required(value: String, err: CourseValidationError) -> Result<String, CourseValidationError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(value)
    }
}

/// Persisted course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    code: String,
    credits: i32,
    instructor: String,
    student_ids: Vec<StudentId>,
}

/// Field bundle used by store adapters to rebuild a [`Course`].
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub id: CourseId,
    pub title: String,
    pub code: String,
    pub credits: i32,
    pub instructor: String,
    pub student_ids: Vec<StudentId>,
}

impl Course {
    pub fn new(draft: CourseDraft) -> Self {
        let CourseDraft {
            id,
            title,
            code,
            credits,
            instructor,
            student_ids,
        } = draft;
        Self {
            id,
            title,
            code,
            credits,
            instructor,
            student_ids,
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn credits(&self) -> i32 {
        self.credits
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    /// Enrolled students, in enrolment order.
    pub fn student_ids(&self) -> &[StudentId] {
        &self.student_ids
    }

    /// Set-add a student id. Returns whether the list changed.
    pub fn admit(&mut self, student_id: StudentId) -> bool {
        if self.student_ids.contains(&student_id) {
            return false;
        }
        self.student_ids.push(student_id);
        true
    }

    /// Set-remove a student id. Returns whether the list changed.
    pub fn release(&mut self, student_id: StudentId) -> bool {
        let before = self.student_ids.len();
        self.student_ids.retain(|id| *id != student_id);
        before != self.student_ids.len()
    }
}

/// Validated input for `addCourse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    title: String,
    code: String,
    credits: i32,
    instructor: String,
}

impl NewCourse {
    pub fn try_new(
        title: impl Into<String>,
        code: impl Into<String>,
        credits: i32,
        instructor: impl Into<String>,
    ) -> Result<Self, CourseValidationError> {
        Ok(Self {
            title: required(title.into(), CourseValidationError::EmptyTitle)?,
            code: required(code.into(), CourseValidationError::EmptyCode)?,
            credits,
            instructor: required(instructor.into(), CourseValidationError::EmptyInstructor)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn credits(&self) -> i32 {
        self.credits
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    /// Materialise the record a store will persist under `id`.
    pub fn into_course(self, id: CourseId) -> Course {
        Course::new(CourseDraft {
            id,
            title: self.title,
            code: self.code,
            credits: self.credits,
            instructor: self.instructor,
            student_ids: Vec::new(),
        })
    }
}

/// Partial replacement of a course's scalar fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    title: Option<String>,
    code: Option<String>,
    credits: Option<i32>,
    instructor: Option<String>,
}

impl CoursePatch {
    pub fn try_new(
        title: Option<String>,
        code: Option<String>,
        credits: Option<i32>,
        instructor: Option<String>,
    ) -> Result<Self, CourseValidationError> {
        Ok(Self {
            title: title
                .map(|t| required(t, CourseValidationError::EmptyTitle))
                .transpose()?,
            code: code
                .map(|c| required(c, CourseValidationError::EmptyCode))
                .transpose()?,
            credits,
            instructor: instructor
                .map(|i| required(i, CourseValidationError::EmptyInstructor))
                .transpose()?,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn credits(&self) -> Option<i32> {
        self.credits
    }

    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.code.is_none()
            && self.credits.is_none()
            && self.instructor.is_none()
    }

    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title.clone_from(title);
        }
        if let Some(code) = &self.code {
            course.code.clone_from(code);
        }
        if let Some(credits) = self.credits {
            course.credits = credits;
        }
        if let Some(instructor) = &self.instructor {
            course.instructor.clone_from(instructor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "CS101", "Grace", CourseValidationError::EmptyTitle)]
    #[case("Intro", " ", "Grace", CourseValidationError::EmptyCode)]
    #[case("Intro", "CS101", "", CourseValidationError::EmptyInstructor)]
    fn new_course_requires_text_fields(
        #[case] title: &str,
        #[case] code: &str,
        #[case] instructor: &str,
        #[case] expected: CourseValidationError,
    ) {
        assert_eq!(NewCourse::try_new(title, code, 3, instructor), Err(expected));
    }

    #[rstest]
    fn validation_error_names_the_field() {
        let err: Error = CourseValidationError::EmptyCode.into();
        let details = err.details().expect("details");
        assert_eq!(details["field"], "code");
        assert_eq!(details["code"], "empty_code");
        assert_eq!(err.message(), "code must not be empty");
    }

    #[rstest]
    fn patch_leaves_relationships_alone() {
        let mut course = NewCourse::try_new("Intro", "CS101", 3, "Grace")
            .expect("valid course")
            .into_course(CourseId::random());
        let student = StudentId::random();
        course.admit(student);

        CoursePatch::try_new(None, None, Some(4), Some("Hopper".to_owned()))
            .expect("valid patch")
            .apply_to(&mut course);

        assert_eq!(course.credits(), 4);
        assert_eq!(course.instructor(), "Hopper");
        assert_eq!(course.title(), "Intro");
        assert_eq!(course.student_ids(), &[student]);
    }

    #[rstest]
    fn admit_is_a_set_add() {
        let mut course = NewCourse::try_new("Intro", "CS101", 3, "Grace")
            .expect("valid course")
            .into_course(CourseId::random());
        let student = StudentId::random();
        assert!(course.admit(student));
        assert!(!course.admit(student));
        assert_eq!(course.student_ids().len(), 1);
        assert!(course.release(student));
        assert!(course.student_ids().is_empty());
    }
}
