pub mod purposes_model;
pub mod purposes_repository;

pub use purposes_model::{DonationPurpose, NewDonationPurpose};
pub use purposes_repository::PurposeRepository;
