//! PostgreSQL-backed `StudentRepository`.
//!
//! Set-adds are expressed as a single guarded `UPDATE`, so two concurrent
//! enrolments of the same pair still leave one entry.

use async_trait::async_trait;
use diesel::dsl::not;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RecordStoreError, StudentRepository};
use crate::domain::{
    CourseId, EmailAddress, NewStudent, Student, StudentDraft, StudentId, StudentListQuery,
    StudentPatch, StudentSortKey,
};

use super::error_mapping::{affected, like_literal, map_diesel_error, map_pool_error, window};
use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::DbPool;
use super::schema::students;
use super::sql_functions::{array_append, array_remove};

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_student(row: StudentRow) -> Result<Student, RecordStoreError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        RecordStoreError::query(format!("stored email for student {} invalid: {err}", row.id))
    })?;
    Ok(Student::new(StudentDraft {
        id: StudentId::from_uuid(row.id),
        name: row.name,
        email,
        age: row.age,
        major: row.major,
        course_ids: row.course_ids.into_iter().map(CourseId::from_uuid).collect(),
    }))
}

fn rows_to_students(rows: Vec<StudentRow>) -> Result<Vec<Student>, RecordStoreError> {
    rows.into_iter().map(row_to_student).collect()
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn create(&self, student: &NewStudent) -> Result<Student, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewStudentRow {
            id: *StudentId::random().as_uuid(),
            name: student.name(),
            email: student.email().as_ref(),
            age: student.age(),
            major: student.major(),
        };

        let inserted = diesel::insert_into(students::table)
            .values(&row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_student(inserted)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        students::table
            .find(*id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_student)
            .transpose()
    }

    async fn find_many_by_ids(
        &self,
        ids: &[StudentId],
    ) -> Result<Vec<Student>, RecordStoreError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = students::table
            .filter(students::id.eq_any(uuids))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let found = rows_to_students(rows)?;
        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|s| s.id() == *id).cloned())
            .collect())
    }

    async fn list(&self, query: &StudentListQuery) -> Result<Vec<Student>, RecordStoreError> {
        let mut statement = students::table
            .select(StudentRow::as_select())
            .into_boxed();

        let filter = &query.filter;
        if let Some(major) = filter.major.as_deref() {
            statement = statement.filter(students::major.eq(major));
        }
        if let Some(needle) = filter.name_contains.as_deref() {
            statement = statement.filter(students::name.ilike(format!("%{}%", like_literal(needle))));
        }
        if let Some(min) = filter.min_age {
            statement = statement.filter(students::age.ge(min));
        }
        if let Some(max) = filter.max_age {
            statement = statement.filter(students::age.le(max));
        }

        if let Some(sort) = query.sort {
            let descending = sort.direction.is_descending();
            statement = match (sort.key, descending) {
                (StudentSortKey::Name, false) => statement.order(students::name.asc()),
                (StudentSortKey::Name, true) => statement.order(students::name.desc()),
                (StudentSortKey::Email, false) => statement.order(students::email.asc()),
                (StudentSortKey::Email, true) => statement.order(students::email.desc()),
                (StudentSortKey::Age, false) => statement.order(students::age.asc()),
                (StudentSortKey::Age, true) => statement.order(students::age.desc()),
                (StudentSortKey::Major, false) => {
                    statement.order(students::major.asc().nulls_first())
                }
                (StudentSortKey::Major, true) => {
                    statement.order(students::major.desc().nulls_last())
                }
            };
        }

        let (offset, limit) = window(query.page);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = statement
            .then_order_by(students::created_at.asc())
            .then_order_by(students::id.asc())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_students(rows)
    }

    async fn update(
        &self,
        id: StudentId,
        patch: &StudentPatch,
    ) -> Result<Option<Student>, RecordStoreError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let changes = StudentChangeset {
            name: patch.name(),
            email: patch.email().map(AsRef::as_ref),
            age: patch.age(),
            major: patch.major(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(students::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_student)
            .transpose()
    }

    async fn delete(&self, id: StudentId) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::delete(students::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows > 0)
    }

    async fn add_course(&self, id: StudentId, course: CourseId) -> Result<bool, RecordStoreError> {
        let course = *course.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::update(
            students::table
                .find(*id.as_uuid())
                .filter(not(students::course_ids.contains(vec![course]))),
        )
        .set(students::course_ids.eq(array_append(students::course_ids, course)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(rows > 0)
    }

    async fn remove_course(
        &self,
        id: StudentId,
        course: CourseId,
    ) -> Result<bool, RecordStoreError> {
        let course = *course.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::update(
            students::table
                .find(*id.as_uuid())
                .filter(students::course_ids.contains(vec![course])),
        )
        .set(students::course_ids.eq(array_remove(students::course_ids, course)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(rows > 0)
    }

    async fn pull_course_from_all(&self, course: CourseId) -> Result<u64, RecordStoreError> {
        let course = *course.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::update(students::table.filter(students::course_ids.contains(vec![course])))
            .set(students::course_ids.eq(array_remove(students::course_ids, course)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected(rows))
    }
}
