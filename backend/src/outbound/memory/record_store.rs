//! `RwLock`-guarded document collections implementing the repository ports.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, RecordStoreError, StudentRepository, UserRepository,
};
use crate::domain::{
    Course, CourseId, CourseListQuery, CoursePatch, EmailAddress, NewCourse, NewStudent,
    NewUserAccount, Student, StudentId, StudentListQuery, StudentPatch, UserAccount,
};

/// Students, courses and user accounts held in memory.
///
/// Each collection has its own lock, so a set-add on one side of an
/// enrolment is atomic per record but the two sides are independent writes,
/// as with a document database.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    students: RwLock<Vec<Student>>,
    courses: RwLock<Vec<Course>>,
    users: RwLock<Vec<UserAccount>>,
}

fn poisoned<T>(_: PoisonError<T>) -> RecordStoreError {
    RecordStoreError::query("record store lock poisoned")
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, RecordStoreError> {
    lock.read().map_err(poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, RecordStoreError> {
    lock.write().map_err(poisoned)
}

fn email_taken<'a>(
    mut students: impl Iterator<Item = &'a Student>,
    email: &EmailAddress,
    except: Option<StudentId>,
) -> bool {
    students.any(|s| s.email() == email && Some(s.id()) != except)
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for MemoryRecordStore {
    async fn create(&self, student: &NewStudent) -> Result<Student, RecordStoreError> {
        let mut students = write(&self.students)?;
        if email_taken(students.iter(), student.email(), None) {
            return Err(RecordStoreError::duplicate("email"));
        }
        let record = student.clone().into_student(StudentId::random());
        students.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RecordStoreError> {
        Ok(read(&self.students)?.iter().find(|s| s.id() == id).cloned())
    }

    async fn find_many_by_ids(
        &self,
        ids: &[StudentId],
    ) -> Result<Vec<Student>, RecordStoreError> {
        let students = read(&self.students)?;
        Ok(ids
            .iter()
            .filter_map(|id| students.iter().find(|s| s.id() == *id).cloned())
            .collect())
    }

    async fn list(&self, query: &StudentListQuery) -> Result<Vec<Student>, RecordStoreError> {
        Ok(query.select(read(&self.students)?.iter()))
    }

    async fn update(
        &self,
        id: StudentId,
        patch: &StudentPatch,
    ) -> Result<Option<Student>, RecordStoreError> {
        let mut students = write(&self.students)?;
        let Some(position) = students.iter().position(|s| s.id() == id) else {
            return Ok(None);
        };
        if patch
            .email()
            .is_some_and(|email| email_taken(students.iter(), email, Some(id)))
        {
            return Err(RecordStoreError::duplicate("email"));
        }
        Ok(students.get_mut(position).map(|student| {
            patch.apply_to(student);
            student.clone()
        }))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, RecordStoreError> {
        let mut students = write(&self.students)?;
        let before = students.len();
        students.retain(|s| s.id() != id);
        Ok(students.len() != before)
    }

    async fn add_course(&self, id: StudentId, course: CourseId) -> Result<bool, RecordStoreError> {
        let mut students = write(&self.students)?;
        Ok(students
            .iter_mut()
            .find(|s| s.id() == id)
            .is_some_and(|s| s.enroll_in(course)))
    }

    async fn remove_course(
        &self,
        id: StudentId,
        course: CourseId,
    ) -> Result<bool, RecordStoreError> {
        let mut students = write(&self.students)?;
        Ok(students
            .iter_mut()
            .find(|s| s.id() == id)
            .is_some_and(|s| s.withdraw_from(course)))
    }

    async fn pull_course_from_all(&self, course: CourseId) -> Result<u64, RecordStoreError> {
        let mut students = write(&self.students)?;
        let changed = students
            .iter_mut()
            .map(|s| s.withdraw_from(course))
            .filter(|changed| *changed)
            .count();
        Ok(u64::try_from(changed).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl CourseRepository for MemoryRecordStore {
    async fn create(&self, course: &NewCourse) -> Result<Course, RecordStoreError> {
        let record = course.clone().into_course(CourseId::random());
        write(&self.courses)?.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, RecordStoreError> {
        Ok(read(&self.courses)?.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_many_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, RecordStoreError> {
        let courses = read(&self.courses)?;
        Ok(ids
            .iter()
            .filter_map(|id| courses.iter().find(|c| c.id() == *id).cloned())
            .collect())
    }

    async fn list(&self, query: &CourseListQuery) -> Result<Vec<Course>, RecordStoreError> {
        Ok(query.select(read(&self.courses)?.iter()))
    }

    async fn update(
        &self,
        id: CourseId,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, RecordStoreError> {
        let mut courses = write(&self.courses)?;
        Ok(courses.iter_mut().find(|c| c.id() == id).map(|course| {
            patch.apply_to(course);
            course.clone()
        }))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, RecordStoreError> {
        let mut courses = write(&self.courses)?;
        let before = courses.len();
        courses.retain(|c| c.id() != id);
        Ok(courses.len() != before)
    }

    async fn add_student(&self, id: CourseId, student: StudentId) -> Result<bool, RecordStoreError> {
        let mut courses = write(&self.courses)?;
        Ok(courses
            .iter_mut()
            .find(|c| c.id() == id)
            .is_some_and(|c| c.admit(student)))
    }

    async fn remove_student(
        &self,
        id: CourseId,
        student: StudentId,
    ) -> Result<bool, RecordStoreError> {
        let mut courses = write(&self.courses)?;
        Ok(courses
            .iter_mut()
            .find(|c| c.id() == id)
            .is_some_and(|c| c.release(student)))
    }

    async fn pull_student_from_all(&self, student: StudentId) -> Result<u64, RecordStoreError> {
        let mut courses = write(&self.courses)?;
        let changed = courses
            .iter_mut()
            .map(|c| c.release(student))
            .filter(|changed| *changed)
            .count();
        Ok(u64::try_from(changed).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl UserRepository for MemoryRecordStore {
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, RecordStoreError> {
        let mut users = write(&self.users)?;
        if users.iter().any(|u| u.email() == &account.email) {
            return Err(RecordStoreError::duplicate("email"));
        }
        let record = UserAccount::from(account.clone());
        users.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, RecordStoreError> {
        Ok(read(&self.users)?.iter().find(|u| u.email() == email).cloned())
    }
}
