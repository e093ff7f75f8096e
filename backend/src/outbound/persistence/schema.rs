//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Student records. `course_ids` is the forward side of enrolment.
    students (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        age -> Int4,
        major -> Nullable<Text>,
        course_ids -> Array<Uuid>,
        /// Insertion time; the default list order.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course records. `student_ids` is the enrolment back-reference.
    courses (id) {
        id -> Uuid,
        title -> Text,
        code -> Text,
        credits -> Int4,
        instructor -> Text,
        student_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Authentication accounts.
    users (id) {
        id -> Uuid,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(students, courses, users);
