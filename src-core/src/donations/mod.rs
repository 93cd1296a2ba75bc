pub mod donations_model;
pub mod donations_repository;
pub mod donations_service;
pub mod donations_traits;

pub use donations_model::{
    Donation, DonationDetails, DonationStatus, DonationTotals, NewDonation,
};
pub use donations_repository::DonationRepository;
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
