use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};

use crate::constants::{DEFAULT_CURRENCY, SIMULATED_CONFIRMATION_DELAY_SECS};
use crate::donations::donations_model::{
    Donation, DonationDetails, DonationStatus, DonationTotals, NewDonation,
};
use crate::donations::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{NewNotification, NotificationServiceTrait, KIND_DONOR_ALERT};

pub struct DonationService<T: DonationRepositoryTrait> {
    repo: Arc<T>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl<T: DonationRepositoryTrait + 'static> DonationService<T> {
    pub fn new(repo: Arc<T>, notifications: Arc<dyn NotificationServiceTrait>) -> Self {
        DonationService {
            repo,
            notifications,
        }
    }

    fn validate(new_donation: &NewDonation) -> Result<()> {
        if new_donation.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(new_donation.amount).into());
        }
        Ok(())
    }

    /// Notification delivery is best-effort and never fails the financial write.
    fn notify_donor(notifications: &dyn NotificationServiceTrait, donation: &Donation) {
        let result = notifications.create(NewNotification {
            id: None,
            recipient_ref: donation.donor_id.clone(),
            title: "Donation Confirmed".to_string(),
            message: format!(
                "Your donation of {} {} has been confirmed.",
                donation.amount, donation.currency
            ),
            kind: KIND_DONOR_ALERT.to_string(),
        });
        if let Err(e) = result {
            warn!("Failed to send confirmation notification: {}", e);
        }
    }
}

#[async_trait]
impl<T: DonationRepositoryTrait + 'static> DonationServiceTrait for DonationService<T> {
    fn get_donations(&self) -> Result<Vec<Donation>> {
        self.repo.list()
    }

    fn get_donation(&self, donation_id: &str) -> Result<DonationDetails> {
        Ok(self.repo.get_by_id(donation_id)?.into())
    }

    fn get_donations_by_donor(&self, donor_id: &str) -> Result<Vec<Donation>> {
        self.repo.list_by_donor(donor_id)
    }

    fn get_donations_by_student(&self, student_id: &str) -> Result<Vec<Donation>> {
        self.repo.list_by_student(student_id)
    }

    fn get_totals(&self) -> Result<DonationTotals> {
        self.repo.totals()
    }

    async fn create_donation(&self, mut new_donation: NewDonation) -> Result<Donation> {
        Self::validate(&new_donation)?;

        new_donation.remaining_amount = Some(new_donation.amount);
        new_donation
            .currency
            .get_or_insert_with(|| DEFAULT_CURRENCY.to_string());
        let status = new_donation
            .status
            .get_or_insert_with(|| DonationStatus::Confirmed.as_str().to_string())
            .clone();

        let donation = self.repo.insert(new_donation)?;
        if status == DonationStatus::Confirmed.as_str() {
            Self::notify_donor(self.notifications.as_ref(), &donation);
        }
        Ok(donation)
    }

    /// Records a PENDING donation and schedules the confirmation flip after a
    /// fixed delay. Fire-and-forget: simulation only, not a production payment
    /// confirmation path.
    async fn simulate_payment(&self, mut new_donation: NewDonation) -> Result<Donation> {
        Self::validate(&new_donation)?;

        new_donation.remaining_amount = Some(new_donation.amount);
        new_donation
            .currency
            .get_or_insert_with(|| DEFAULT_CURRENCY.to_string());
        new_donation.status = Some(DonationStatus::Pending.as_str().to_string());
        new_donation.payment_method = Some("Simulated Card".to_string());
        new_donation.transaction_reference =
            Some(format!("SIM-TXN-{}", Utc::now().timestamp_millis()));

        let donation = self.repo.insert(new_donation)?;
        info!(
            "Simulated payment started: {}",
            donation.transaction_reference.as_deref().unwrap_or("-")
        );

        let repo = self.repo.clone();
        let notifications = self.notifications.clone();
        let donation_id = donation.id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(SIMULATED_CONFIRMATION_DELAY_SECS)).await;
            match repo.set_status(&donation_id, DonationStatus::Confirmed) {
                Ok(confirmed) => {
                    info!("Donation {} confirmed automatically", donation_id);
                    Self::notify_donor(notifications.as_ref(), &confirmed);
                }
                Err(e) => warn!("Deferred confirmation of {} failed: {}", donation_id, e),
            }
        });

        Ok(donation)
    }

    /// Webhook-style explicit confirmation: PENDING -> CONFIRMED.
    async fn confirm_donation(&self, donation_id: &str) -> Result<Donation> {
        let donation = self.repo.get_by_id(donation_id)?;
        if donation.status != DonationStatus::Pending.as_str() {
            return Err(Error::Conflict(format!(
                "Donation {} is {}, only PENDING donations can be confirmed",
                donation_id, donation.status
            )));
        }

        let confirmed = self.repo.set_status(donation_id, DonationStatus::Confirmed)?;
        Self::notify_donor(self.notifications.as_ref(), &confirmed);
        Ok(confirmed)
    }
}
