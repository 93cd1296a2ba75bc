use crate::errors::Result;
use crate::students::students_model::{NewStudent, Student};

/// Trait for student repository operations
pub trait StudentRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Student>>;
    fn get_by_id(&self, student_id: &str) -> Result<Student>;
    fn insert(&self, new_student: NewStudent) -> Result<Student>;
    fn update(&self, student: Student) -> Result<Student>;
    fn delete(&self, student_id: &str) -> Result<usize>;
}

/// Trait for student service operations
#[async_trait::async_trait]
pub trait StudentServiceTrait: Send + Sync {
    fn get_students(&self) -> Result<Vec<Student>>;
    fn get_student(&self, student_id: &str) -> Result<Student>;
    async fn create_student(&self, new_student: NewStudent) -> Result<Student>;
    async fn update_student(&self, student: Student) -> Result<Student>;
    async fn delete_student(&self, student_id: &str) -> Result<usize>;
}
