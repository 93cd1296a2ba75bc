pub mod donors_model;
pub mod donors_repository;

pub use donors_model::{Donor, NewDonor};
pub use donors_repository::DonorRepository;
