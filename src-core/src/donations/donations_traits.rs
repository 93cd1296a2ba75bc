use crate::donations::donations_model::{
    Donation, DonationDetails, DonationStatus, DonationTotals, NewDonation,
};
use crate::errors::Result;

/// Trait for donation repository operations
pub trait DonationRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Donation>>;
    fn get_by_id(&self, donation_id: &str) -> Result<Donation>;
    fn list_by_donor(&self, donor_id: &str) -> Result<Vec<Donation>>;
    fn list_by_student(&self, student_id: &str) -> Result<Vec<Donation>>;
    fn insert(&self, new_donation: NewDonation) -> Result<Donation>;
    fn set_status(&self, donation_id: &str, status: DonationStatus) -> Result<Donation>;
    fn totals(&self) -> Result<DonationTotals>;
}

/// Trait for donation service operations
#[async_trait::async_trait]
pub trait DonationServiceTrait: Send + Sync {
    fn get_donations(&self) -> Result<Vec<Donation>>;
    fn get_donation(&self, donation_id: &str) -> Result<DonationDetails>;
    fn get_donations_by_donor(&self, donor_id: &str) -> Result<Vec<Donation>>;
    fn get_donations_by_student(&self, student_id: &str) -> Result<Vec<Donation>>;
    fn get_totals(&self) -> Result<DonationTotals>;
    async fn create_donation(&self, new_donation: NewDonation) -> Result<Donation>;
    async fn simulate_payment(&self, new_donation: NewDonation) -> Result<Donation>;
    async fn confirm_donation(&self, donation_id: &str) -> Result<Donation>;
}
