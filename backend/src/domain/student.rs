//! Student records and their validated inputs.
//!
//! A student's `course_ids` is the forward side of the enrolment relation;
//! the matching back-reference lives in [`Course::student_ids`]. Both sides
//! are kept duplicate free by the store's set-add semantics.
//!
//! [`Course::student_ids`]: super::Course::student_ids

use std::fmt;

use serde_json::json;

use super::{CourseId, EmailAddress, EmailValidationError, Error, StudentId};

/// Validation errors raised by student inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyName,
    Email(EmailValidationError),
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::Email(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StudentValidationError {}

impl From<StudentValidationError> for Error {
    fn from(value: StudentValidationError) -> Self {
        let (field, code) = match &value {
            StudentValidationError::EmptyName => ("name", "empty_name"),
            StudentValidationError::Email(EmailValidationError::Empty) => ("email", "empty_email"),
            StudentValidationError::Email(EmailValidationError::Malformed) => {
                ("email", "invalid_email")
            }
        };
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": field, "code": code }))
    }
}

fn required_text(value: String) -> Result<String, StudentValidationError> {
    if value.trim().is_empty() {
        return Err(StudentValidationError::EmptyName);
    }
    Ok(value)
}

fn email(value: &str) -> Result<EmailAddress, StudentValidationError> {
    EmailAddress::new(value).map_err(StudentValidationError::Email)
}

/// Persisted student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
    email: EmailAddress,
    age: i32,
    major: Option<String>,
    course_ids: Vec<CourseId>,
}

/// Field bundle used by store adapters to rebuild a [`Student`].
#[derive(Debug, Clone)]
pub struct StudentDraft {
    pub id: StudentId,
    pub name: String,
    pub email: EmailAddress,
    pub age: i32,
    pub major: Option<String>,
    pub course_ids: Vec<CourseId>,
}

impl Student {
    /// Rebuild a student from stored fields.
    pub fn new(draft: StudentDraft) -> Self {
        let StudentDraft {
            id,
            name,
            email,
            age,
            major,
            course_ids,
        } = draft;
        Self {
            id,
            name,
            email,
            age,
            major,
            course_ids,
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }

    /// Courses this student is enrolled in, in enrolment order.
    pub fn course_ids(&self) -> &[CourseId] {
        &self.course_ids
    }
}

/// Validated input for `addStudent`.
///
/// # Examples
/// ```
/// use registrar::domain::NewStudent;
///
/// let student = NewStudent::try_new("Ada", "ada@x.com", 22, None).expect("valid");
/// assert_eq!(student.name(), "Ada");
/// assert!(NewStudent::try_new(" ", "ada@x.com", 22, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    name: String,
    email: EmailAddress,
    age: i32,
    major: Option<String>,
}

impl NewStudent {
    pub fn try_new(
        name: impl Into<String>,
        email_raw: &str,
        age: i32,
        major: Option<String>,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: required_text(name.into())?,
            email: email(email_raw)?,
            age,
            major,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }

    /// Materialise the record a store will persist under `id`.
    pub fn into_student(self, id: StudentId) -> Student {
        Student::new(StudentDraft {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            major: self.major,
            course_ids: Vec::new(),
        })
    }
}

/// Partial replacement of a student's scalar fields.
///
/// Absent fields are left untouched. Enrolment is never changed through a
/// patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    name: Option<String>,
    email: Option<EmailAddress>,
    age: Option<i32>,
    major: Option<String>,
}

impl StudentPatch {
    pub fn try_new(
        name: Option<String>,
        email_raw: Option<&str>,
        age: Option<i32>,
        major: Option<String>,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: name.map(required_text).transpose()?,
            email: email_raw.map(email).transpose()?,
            age,
            major,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.major.is_none()
    }

    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(major) = &self.major {
            student.major = Some(major.clone());
        }
    }
}

impl Student {
    /// Set-add a course id. Returns whether the list changed.
    pub fn enroll_in(&mut self, course_id: CourseId) -> bool {
        if self.course_ids.contains(&course_id) {
            return false;
        }
        self.course_ids.push(course_id);
        true
    }

    /// Set-remove a course id. Returns whether the list changed.
    pub fn withdraw_from(&mut self, course_id: CourseId) -> bool {
        let before = self.course_ids.len();
        self.course_ids.retain(|id| *id != course_id);
        before != self.course_ids.len()
    }
}
