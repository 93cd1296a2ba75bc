pub mod guardians_model;
pub mod guardians_repository;

pub use guardians_model::{Guardian, NewGuardian};
pub use guardians_repository::GuardianRepository;
