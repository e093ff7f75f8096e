//! End-to-end behaviour of filtered, sorted and paginated list queries.

#[path = "support/graphql.rs"]
mod graphql_support;

use graphql_support::Harness;
use registrar::domain::ports::{CourseRepository, StudentRepository};
use registrar::domain::{NewCourse, NewStudent};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const STUDENTS: &str = "query($filter: StudentFilter, $options: ListOptions) {
    getAllStudents(filter: $filter, options: $options) { name age major }
}";

const COURSES: &str = "query($filter: CourseFilter, $options: ListOptions) {
    getAllCourses(filter: $filter, options: $options) { code credits }
}";

async fn seed_students(harness: &Harness, count: i32) {
    for n in 0..count {
        let major = if n % 2 == 0 { Some("Physics".to_owned()) } else { None };
        let student = NewStudent::try_new(
            format!("Student {n:02}"),
            &format!("student{n}@example.edu"),
            18 + n % 12,
            major,
        )
        .expect("valid student");
        StudentRepository::create(harness.store.as_ref(), &student)
            .await
            .expect("seed student");
    }
}

async fn seed_courses(harness: &Harness) {
    for (title, code, credits) in [
        ("Compilers", "CS101", 3),
        ("Databases", "cs102", 4),
        ("Linear Algebra", "MA201", 5),
        ("Operating Systems", "CS301", 6),
    ] {
        let course = NewCourse::try_new(title, code, credits, "Grace").expect("valid course");
        CourseRepository::create(harness.store.as_ref(), &course)
            .await
            .expect("seed course");
    }
}

async fn students(harness: &Harness, variables: Value) -> Vec<Value> {
    let body = harness.run(STUDENTS, variables, None).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    body["data"]["getAllStudents"]
        .as_array()
        .expect("student list")
        .clone()
}

async fn course_codes(harness: &Harness, variables: Value) -> Vec<String> {
    let body = harness.run(COURSES, variables, None).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    body["data"]["getAllCourses"]
        .as_array()
        .expect("course list")
        .iter()
        .map(|c| c["code"].as_str().expect("code").to_owned())
        .collect()
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
#[case(json!(null), 10)]
#[case(json!({ "limit": 5 }), 5)]
#[case(json!({ "limit": 1000 }), 50)]
#[case(json!({ "limit": 0 }), 10)]
#[case(json!({ "offset": 55 }), 5)]
#[actix_web::test]
async fn page_size_is_defaulted_and_capped(
    harness: Harness,
    #[case] options: Value,
    #[case] expected: usize,
) {
    seed_students(&harness, 60).await;
    let found = students(&harness, json!({ "options": options })).await;
    assert_eq!(found.len(), expected);
}

#[rstest]
#[actix_web::test]
async fn age_range_is_inclusive(harness: Harness) {
    seed_students(&harness, 24).await;
    let found = students(
        &harness,
        json!({ "filter": { "minAge": 20, "maxAge": 25 }, "options": { "limit": 50 } }),
    )
    .await;
    assert!(!found.is_empty());
    assert!(found.iter().all(|s| {
        let age = s["age"].as_i64().expect("age");
        (20..=25).contains(&age)
    }));
    assert!(found.iter().any(|s| s["age"] == 20));
    assert!(found.iter().any(|s| s["age"] == 25));
}

#[rstest]
#[actix_web::test]
async fn name_and_major_filters_combine(harness: Harness) {
    seed_students(&harness, 12).await;
    let found = students(
        &harness,
        json!({ "filter": { "nameContains": "student 1", "major": "Physics" } }),
    )
    .await;
    let names: Vec<&str> = found.iter().map(|s| s["name"].as_str().expect("name")).collect();
    assert_eq!(names, vec!["Student 10"]);
}

#[rstest]
#[actix_web::test]
async fn sort_order_is_descending_only_for_exact_desc(harness: Harness) {
    seed_students(&harness, 5).await;
    let ages = |found: Vec<Value>| -> Vec<i64> {
        found.iter().map(|s| s["age"].as_i64().expect("age")).collect()
    };

    let desc = ages(students(&harness, json!({ "options": { "sortBy": "age", "sortOrder": "DESC" } })).await);
    assert_eq!(desc, vec![22, 21, 20, 19, 18]);

    let lower = ages(students(&harness, json!({ "options": { "sortBy": "age", "sortOrder": "desc" } })).await);
    assert_eq!(lower, vec![18, 19, 20, 21, 22]);
}

#[rstest]
#[actix_web::test]
async fn code_prefix_is_case_insensitive(harness: Harness) {
    seed_courses(&harness).await;
    let codes = course_codes(&harness, json!({ "filter": { "codePrefix": "cs" } })).await;
    assert_eq!(codes, vec!["CS101", "cs102", "CS301"]);
}

#[rstest]
#[actix_web::test]
async fn credit_range_and_sorting_apply_to_courses(harness: Harness) {
    seed_courses(&harness).await;
    let codes = course_codes(
        &harness,
        json!({
            "filter": { "minCredits": 4, "maxCredits": 5 },
            "options": { "sortBy": "credits", "sortOrder": "DESC" }
        }),
    )
    .await;
    assert_eq!(codes, vec!["MA201", "cs102"]);
}

#[rstest]
#[actix_web::test]
async fn negative_paging_is_an_invalid_request(harness: Harness) {
    let body = harness
        .run(STUDENTS, json!({ "options": { "offset": -1 } }), None)
        .await;
    assert_eq!(graphql_support::error_code(&body), "invalid_request");
}
