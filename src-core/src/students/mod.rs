pub mod students_model;
pub mod students_repository;
pub mod students_service;
pub mod students_traits;

pub use students_model::{NewStudent, Student};
pub use students_repository::StudentRepository;
pub use students_service::StudentService;
pub use students_traits::{StudentRepositoryTrait, StudentServiceTrait};
