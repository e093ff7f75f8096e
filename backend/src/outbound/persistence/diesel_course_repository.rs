//! PostgreSQL-backed `CourseRepository`.

use async_trait::async_trait;
use diesel::dsl::not;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, RecordStoreError};
use crate::domain::{
    Course, CourseDraft, CourseId, CourseListQuery, CoursePatch, CourseSortKey, NewCourse,
    StudentId,
};

use super::error_mapping::{affected, like_literal, map_diesel_error, map_pool_error, window};
use super::models::{CourseChangeset, CourseRow, NewCourseRow};
use super::pool::DbPool;
use super::schema::courses;
use super::sql_functions::{array_append, array_remove};

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course::new(CourseDraft {
            id: CourseId::from_uuid(row.id),
            title: row.title,
            code: row.code,
            credits: row.credits,
            instructor: row.instructor,
            student_ids: row.student_ids.into_iter().map(StudentId::from_uuid).collect(),
        })
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn create(&self, course: &NewCourse) -> Result<Course, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCourseRow {
            id: *CourseId::random().as_uuid(),
            title: course.title(),
            code: course.code(),
            credits: course.credits(),
            instructor: course.instructor(),
        };

        diesel::insert_into(courses::table)
            .values(&row)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Course::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(*id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn find_many_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, RecordStoreError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<Course> = courses::table
            .filter(courses::id.eq_any(uuids))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(Course::from)
            .collect();

        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|c| c.id() == *id).cloned())
            .collect())
    }

    async fn list(&self, query: &CourseListQuery) -> Result<Vec<Course>, RecordStoreError> {
        let mut statement = courses::table.select(CourseRow::as_select()).into_boxed();

        let filter = &query.filter;
        if let Some(instructor) = filter.instructor.as_deref() {
            statement = statement.filter(courses::instructor.eq(instructor));
        }
        if let Some(needle) = filter.title_contains.as_deref() {
            statement =
                statement.filter(courses::title.ilike(format!("%{}%", like_literal(needle))));
        }
        if let Some(prefix) = filter.code_prefix.as_deref() {
            statement = statement.filter(courses::code.ilike(format!("{}%", like_literal(prefix))));
        }
        if let Some(min) = filter.min_credits {
            statement = statement.filter(courses::credits.ge(min));
        }
        if let Some(max) = filter.max_credits {
            statement = statement.filter(courses::credits.le(max));
        }

        if let Some(sort) = query.sort {
            statement = match (sort.key, sort.direction.is_descending()) {
                (CourseSortKey::Title, false) => statement.order(courses::title.asc()),
                (CourseSortKey::Title, true) => statement.order(courses::title.desc()),
                (CourseSortKey::Code, false) => statement.order(courses::code.asc()),
                (CourseSortKey::Code, true) => statement.order(courses::code.desc()),
                (CourseSortKey::Credits, false) => statement.order(courses::credits.asc()),
                (CourseSortKey::Credits, true) => statement.order(courses::credits.desc()),
                (CourseSortKey::Instructor, false) => statement.order(courses::instructor.asc()),
                (CourseSortKey::Instructor, true) => statement.order(courses::instructor.desc()),
            };
        }

        let (offset, limit) = window(query.page);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = statement
            .then_order_by(courses::created_at.asc())
            .then_order_by(courses::id.asc())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn update(
        &self,
        id: CourseId,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, RecordStoreError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let changes = CourseChangeset {
            title: patch.title(),
            code: patch.code(),
            credits: patch.credits(),
            instructor: patch.instructor(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = diesel::update(courses::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::delete(courses::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows > 0)
    }

    async fn add_student(&self, id: CourseId, student: StudentId) -> Result<bool, RecordStoreError> {
        let student = *student.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::update(
            courses::table
                .find(*id.as_uuid())
                .filter(not(courses::student_ids.contains(vec![student]))),
        )
        .set(courses::student_ids.eq(array_append(courses::student_ids, student)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(rows > 0)
    }

    async fn remove_student(
        &self,
        id: CourseId,
        student: StudentId,
    ) -> Result<bool, RecordStoreError> {
        let student = *student.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::update(
            courses::table
                .find(*id.as_uuid())
                .filter(courses::student_ids.contains(vec![student])),
        )
        .set(courses::student_ids.eq(array_remove(courses::student_ids, student)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(rows > 0)
    }

    async fn pull_student_from_all(&self, student: StudentId) -> Result<u64, RecordStoreError> {
        let student = *student.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::update(courses::table.filter(courses::student_ids.contains(vec![student])))
            .set(courses::student_ids.eq(array_remove(courses::student_ids, student)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected(rows))
    }
}
