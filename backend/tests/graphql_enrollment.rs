//! End-to-end behaviour of enrolment and cascading deletes.

#[path = "support/graphql.rs"]
mod graphql_support;

use graphql_support::{Harness, ids};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
#[actix_web::test]
async fn deleting_a_course_clears_it_from_enrolled_students(harness: Harness) {
    let ada = harness.add_student("Ada", "ada@x.com", 22).await;
    let cs101 = harness.add_course("CS101", "CS101", 3, "Grace").await;

    let enrolled = harness.enroll(&ada, &cs101).await;
    assert_eq!(ids(&enrolled["courses"]), vec![cs101.clone()]);
    assert_eq!(enrolled["coursesCount"], 1);

    let course = harness.course(&cs101).await;
    assert_eq!(ids(&course["students"]), vec![ada.clone()]);
    assert_eq!(course["studentsCount"], 1);

    let deleted = harness
        .run_ok(
            "mutation($id: ID!) { deleteCourse(id: $id) }",
            json!({ "id": &cs101 }),
        )
        .await;
    assert_eq!(deleted["deleteCourse"], true);

    let student = harness.student(&ada).await;
    assert_eq!(student["courses"], json!([]));
    assert_eq!(student["coursesCount"], 0);
    assert!(harness.course(&cs101).await.is_null());
}

#[rstest]
#[actix_web::test]
async fn enrolling_twice_keeps_a_single_reference(harness: Harness) {
    let ada = harness.add_student("Ada", "ada@x.com", 22).await;
    let cs101 = harness.add_course("Compilers", "CS101", 3, "Grace").await;

    harness.enroll(&ada, &cs101).await;
    let again = harness.enroll(&ada, &cs101).await;

    assert_eq!(ids(&again["courses"]), vec![cs101.clone()]);
    assert_eq!(harness.course(&cs101).await["studentsCount"], 1);
}

#[rstest]
#[actix_web::test]
async fn unenrolling_restores_both_sides(harness: Harness) {
    let ada = harness.add_student("Ada", "ada@x.com", 22).await;
    let cs101 = harness.add_course("Compilers", "CS101", 3, "Grace").await;
    let cs102 = harness.add_course("Databases", "CS102", 4, "Edgar").await;
    harness.enroll(&ada, &cs102).await;

    harness.enroll(&ada, &cs101).await;
    let data = harness
        .run_ok(
            "mutation($s: ID!, $c: ID!) {
                unenrollStudent(studentId: $s, courseId: $c) { courses { id } }
            }",
            json!({ "s": &ada, "c": &cs101 }),
        )
        .await;

    assert_eq!(ids(&data["unenrollStudent"]["courses"]), vec![cs102.clone()]);
    assert_eq!(harness.course(&cs101).await["students"], json!([]));
    assert_eq!(ids(&harness.course(&cs102).await["students"]), vec![ada]);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_student_clears_every_roster(harness: Harness) {
    let ada = harness.add_student("Ada", "ada@x.com", 22).await;
    let alan = harness.add_student("Alan", "alan@x.com", 24).await;
    let cs101 = harness.add_course("Compilers", "CS101", 3, "Grace").await;
    let cs102 = harness.add_course("Databases", "CS102", 4, "Edgar").await;
    for course in [&cs101, &cs102] {
        harness.enroll(&ada, course).await;
        harness.enroll(&alan, course).await;
    }

    let deleted = harness
        .run_ok(
            "mutation($id: ID!) { deleteStudent(id: $id) }",
            json!({ "id": &ada }),
        )
        .await;
    assert_eq!(deleted["deleteStudent"], true);

    for course in [&cs101, &cs102] {
        assert_eq!(ids(&harness.course(course).await["students"]), vec![alan.clone()]);
    }
    assert!(harness.student(&ada).await.is_null());
}

#[rstest]
#[actix_web::test]
async fn deleting_an_unknown_record_succeeds(harness: Harness) {
    let data = harness
        .run_ok(
            "mutation($id: ID!) { deleteStudent(id: $id) deleteCourse(id: $id) }",
            json!({ "id": "5f1d7f0e-2f4b-4a53-9a4e-6a0f4b1f2c3d" }),
        )
        .await;
    assert_eq!(data["deleteStudent"], true);
    assert_eq!(data["deleteCourse"], true);
}

#[rstest]
#[actix_web::test]
async fn enrolling_a_missing_student_is_not_found(harness: Harness) {
    let cs101 = harness.add_course("Compilers", "CS101", 3, "Grace").await;
    let token = harness.bearer();
    let body = harness
        .run(
            "mutation($s: ID!, $c: ID!) { enrollStudent(studentId: $s, courseId: $c) { id } }",
            json!({ "s": "5f1d7f0e-2f4b-4a53-9a4e-6a0f4b1f2c3d", "c": &cs101 }),
            Some(&token),
        )
        .await;
    assert_eq!(graphql_support::error_code(&body), "not_found");
    assert!(body["errors"][0]["extensions"]["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn updates_replace_only_supplied_fields(harness: Harness) {
    let ada = harness.add_student("Ada", "ada@x.com", 22).await;
    let data = harness
        .run_ok(
            "mutation($id: ID!) {
                updateStudent(id: $id, input: { age: 23, major: \"Mathematics\" }) {
                    name email age major
                }
            }",
            json!({ "id": &ada }),
        )
        .await;
    assert_eq!(
        data["updateStudent"],
        json!({ "name": "Ada", "email": "ada@x.com", "age": 23, "major": "Mathematics" })
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_student_email_is_rejected(harness: Harness) {
    harness.add_student("Ada", "ada@x.com", 22).await;
    let token = harness.bearer();
    let body = harness
        .run(
            "mutation { addStudent(name: \"Impostor\", email: \"ada@x.com\", age: 30) { id } }",
            json!({}),
            Some(&token),
        )
        .await;
    assert_eq!(graphql_support::error_code(&body), "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn updating_an_unknown_student_is_not_found_even_with_a_taken_email(harness: Harness) {
    harness.add_student("Ada", "ada@x.com", 22).await;
    let token = harness.bearer();
    let body = harness
        .run(
            "mutation($id: ID!) { updateStudent(id: $id, input: { email: \"ada@x.com\" }) { id } }",
            json!({ "id": "5f1d7f0e-2f4b-4a53-9a4e-6a0f4b1f2c3d" }),
            Some(&token),
        )
        .await;
    assert_eq!(graphql_support::error_code(&body), "not_found");
}
