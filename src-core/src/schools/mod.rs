pub mod schools_model;
pub mod schools_repository;

pub use schools_model::{NewSchool, School};
pub use schools_repository::SchoolRepository;
