use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::students;
use crate::students::students_model::{NewStudent, Student};
use crate::students::students_traits::StudentRepositoryTrait;

pub struct StudentRepository {
    pool: Arc<DbPool>,
}

impl StudentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        StudentRepository { pool }
    }
}

impl StudentRepositoryTrait for StudentRepository {
    fn list(&self) -> Result<Vec<Student>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(students::table
            .order(students::created_at.desc())
            .load::<Student>(&mut conn)?)
    }

    fn get_by_id(&self, student_id: &str) -> Result<Student> {
        let mut conn = get_connection(&self.pool)?;
        students::table
            .find(student_id)
            .first::<Student>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Student {}", student_id)))
    }

    fn insert(&self, mut new_student: NewStudent) -> Result<Student> {
        let mut conn = get_connection(&self.pool)?;
        new_student.stamp();

        Ok(diesel::insert_into(students::table)
            .values(&new_student)
            .returning(students::all_columns)
            .get_result(&mut conn)?)
    }

    fn update(&self, mut student: Student) -> Result<Student> {
        let mut conn = get_connection(&self.pool)?;
        student.updated_at = chrono::Utc::now().naive_utc();
        let student_id = student.id.clone();

        diesel::update(students::table.find(&student_id))
            .set(&student)
            .execute(&mut conn)?;

        Ok(students::table.find(student_id).first(&mut conn)?)
    }

    fn delete(&self, student_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(students::table.find(student_id)).execute(&mut conn)?)
    }
}
