use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Result, ValidationError};
use crate::students::students_model::{NewStudent, Student};
use crate::students::students_traits::{StudentRepositoryTrait, StudentServiceTrait};

pub struct StudentService<T: StudentRepositoryTrait> {
    repo: Arc<T>,
}

impl<T: StudentRepositoryTrait> StudentService<T> {
    pub fn new(repo: Arc<T>) -> Self {
        StudentService { repo }
    }
}

#[async_trait]
impl<T: StudentRepositoryTrait + Send + Sync> StudentServiceTrait for StudentService<T> {
    fn get_students(&self) -> Result<Vec<Student>> {
        self.repo.list()
    }

    fn get_student(&self, student_id: &str) -> Result<Student> {
        self.repo.get_by_id(student_id)
    }

    async fn create_student(&self, new_student: NewStudent) -> Result<Student> {
        if new_student.full_name.trim().is_empty() {
            return Err(ValidationError::MissingField("fullName".into()).into());
        }
        self.repo.insert(new_student)
    }

    async fn update_student(&self, student: Student) -> Result<Student> {
        self.repo.get_by_id(&student.id)?;
        self.repo.update(student)
    }

    async fn delete_student(&self, student_id: &str) -> Result<usize> {
        self.repo.get_by_id(student_id)?;
        self.repo.delete(student_id)
    }
}
