//! List query construction for students and courses.
//!
//! Resolvers hand over the raw filter and option inputs; the builders here
//! normalise them into typed queries that every store adapter interprets the
//! same way:
//!
//! - empty strings are treated as "no predicate";
//! - `*Contains` and `codePrefix` match case-insensitively on literal text;
//! - range bounds are inclusive and independent of each other;
//! - an unrecognised `sortBy` leaves the store's insertion order;
//! - the page window is validated by [`PageRequest`].

use std::cmp::Ordering;

use pagination::{PageRequest, PageRequestError, SortDirection};
use serde_json::json;

use super::{Course, Error, Student};

impl From<PageRequestError> for Error {
    fn from(value: PageRequestError) -> Self {
        let field = match value {
            PageRequestError::NegativeLimit(_) => "limit",
            PageRequestError::NegativeOffset(_) => "offset",
        };
        Error::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Paging and sorting options as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}

fn within(value: i32, min: Option<i32>, max: Option<i32>) -> bool {
    min.is_none_or(|lo| value >= lo) && max.is_none_or(|hi| value <= hi)
}

/// Student predicates; every present predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub major: Option<String>,
    pub name_contains: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl StudentFilter {
    fn normalised(self) -> Self {
        Self {
            major: non_blank(self.major),
            name_contains: non_blank(self.name_contains),
            ..self
        }
    }

    /// Whether no predicate is present.
    pub fn is_empty(&self) -> bool {
        self.major.is_none()
            && self.name_contains.is_none()
            && self.min_age.is_none()
            && self.max_age.is_none()
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, student: &Student) -> bool {
        self.major
            .as_deref()
            .is_none_or(|major| student.major() == Some(major))
            && self
                .name_contains
                .as_deref()
                .is_none_or(|needle| contains_ci(student.name(), needle))
            && within(student.age(), self.min_age, self.max_age)
    }
}

/// Course predicates; every present predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub code_prefix: Option<String>,
    pub title_contains: Option<String>,
    pub instructor: Option<String>,
    pub min_credits: Option<i32>,
    pub max_credits: Option<i32>,
}

impl CourseFilter {
    fn normalised(self) -> Self {
        Self {
            code_prefix: non_blank(self.code_prefix),
            title_contains: non_blank(self.title_contains),
            instructor: non_blank(self.instructor),
            ..self
        }
    }

    /// Whether no predicate is present.
    pub fn is_empty(&self) -> bool {
        self.code_prefix.is_none()
            && self.title_contains.is_none()
            && self.instructor.is_none()
            && self.min_credits.is_none()
            && self.max_credits.is_none()
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, course: &Course) -> bool {
        self.instructor
            .as_deref()
            .is_none_or(|instructor| course.instructor() == instructor)
            && self
                .title_contains
                .as_deref()
                .is_none_or(|needle| contains_ci(course.title(), needle))
            && self
                .code_prefix
                .as_deref()
                .is_none_or(|prefix| starts_with_ci(course.code(), prefix))
            && within(course.credits(), self.min_credits, self.max_credits)
    }
}

/// Sortable student fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentSortKey {
    Name,
    Email,
    Age,
    Major,
}

impl StudentSortKey {
    /// Parse a GraphQL field name.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "age" => Some(Self::Age),
            "major" => Some(Self::Major),
            _ => None,
        }
    }

    /// Ascending order of two records by this key.
    pub fn compare(self, a: &Student, b: &Student) -> Ordering {
        match self {
            Self::Name => a.name().cmp(b.name()),
            Self::Email => a.email().as_ref().cmp(b.email().as_ref()),
            Self::Age => a.age().cmp(&b.age()),
            // Missing majors sort first, as a document store orders nulls.
            Self::Major => a.major().cmp(&b.major()),
        }
    }
}

/// Sortable course fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseSortKey {
    Title,
    Code,
    Credits,
    Instructor,
}

impl CourseSortKey {
    /// Parse a GraphQL field name.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "title" => Some(Self::Title),
            "code" => Some(Self::Code),
            "credits" => Some(Self::Credits),
            "instructor" => Some(Self::Instructor),
            _ => None,
        }
    }

    /// Ascending order of two records by this key.
    pub fn compare(self, a: &Course, b: &Course) -> Ordering {
        match self {
            Self::Title => a.title().cmp(b.title()),
            Self::Code => a.code().cmp(b.code()),
            Self::Credits => a.credits().cmp(&b.credits()),
            Self::Instructor => a.instructor().cmp(b.instructor()),
        }
    }
}

/// A sort key paired with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// Requested ordering for students.
pub type StudentSort = Sort<StudentSortKey>;
/// Requested ordering for courses.
pub type CourseSort = Sort<CourseSortKey>;

fn sort_from<K>(options: &ListOptions, parse: impl Fn(&str) -> Option<K>) -> Option<Sort<K>> {
    let key = options.sort_by.as_deref().and_then(parse)?;
    Some(Sort {
        key,
        direction: SortDirection::from_order(options.sort_order.as_deref()),
    })
}

/// Fully normalised student list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentListQuery {
    pub filter: StudentFilter,
    pub sort: Option<StudentSort>,
    pub page: PageRequest,
}

impl StudentListQuery {
    /// Build a query from client input.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::{ListOptions, StudentFilter, StudentListQuery};
    ///
    /// let options = ListOptions { limit: Some(1000), ..ListOptions::default() };
    /// let query = StudentListQuery::build(StudentFilter::default(), options).expect("valid");
    /// assert_eq!(query.page.limit(), 50);
    /// ```
    pub fn build(filter: StudentFilter, options: ListOptions) -> Result<Self, Error> {
        let page = PageRequest::new(options.limit, options.offset)?;
        Ok(Self {
            filter: filter.normalised(),
            sort: sort_from(&options, StudentSortKey::parse),
            page,
        })
    }

    /// Run the query over records held in insertion order.
    pub fn select<'a, I>(&self, records: I) -> Vec<Student>
    where
        I: IntoIterator<Item = &'a Student>,
    {
        let mut matched: Vec<&Student> = records
            .into_iter()
            .filter(|s| self.filter.matches(s))
            .collect();
        if let Some(sort) = self.sort {
            matched.sort_by(|a, b| directed(sort.key.compare(a, b), sort.direction));
        }
        self.page.apply(matched).cloned().collect()
    }
}

/// Fully normalised course list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseListQuery {
    pub filter: CourseFilter,
    pub sort: Option<CourseSort>,
    pub page: PageRequest,
}

impl CourseListQuery {
    /// Build a query from client input.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::{CourseFilter, CourseListQuery, ListOptions};
    ///
    /// let options = ListOptions { sort_by: Some("credits".into()), ..ListOptions::default() };
    /// let query = CourseListQuery::build(CourseFilter::default(), options).expect("valid");
    /// assert_eq!(query.page.limit(), 10);
    /// assert!(query.sort.is_some());
    /// ```
    pub fn build(filter: CourseFilter, options: ListOptions) -> Result<Self, Error> {
        let page = PageRequest::new(options.limit, options.offset)?;
        Ok(Self {
            filter: filter.normalised(),
            sort: sort_from(&options, CourseSortKey::parse),
            page,
        })
    }

    /// Run the query over records held in insertion order.
    pub fn select<'a, I>(&self, records: I) -> Vec<Course>
    where
        I: IntoIterator<Item = &'a Course>,
    {
        let mut matched: Vec<&Course> = records
            .into_iter()
            .filter(|c| self.filter.matches(c))
            .collect();
        if let Some(sort) = self.sort {
            matched.sort_by(|a, b| directed(sort.key.compare(a, b), sort.direction));
        }
        self.page.apply(matched).cloned().collect()
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    if direction.is_descending() {
        ordering.reverse()
    } else {
        ordering
    }
}
