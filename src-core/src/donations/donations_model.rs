use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Donor-facing lifecycle. Only CONFIRMED donations are eligible for
/// allocation; USED is set once the remaining balance reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    Pending,
    Confirmed,
    Allocated,
    Used,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Confirmed => "CONFIRMED",
            DonationStatus::Allocated => "ALLOCATED",
            DonationStatus::Used => "USED",
        }
    }
}

impl std::str::FromStr for DonationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DonationStatus::Pending),
            "CONFIRMED" => Ok(DonationStatus::Confirmed),
            "ALLOCATED" => Ok(DonationStatus::Allocated),
            "USED" => Ok(DonationStatus::Used),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown donation status '{}'",
                other
            ))
            .into()),
        }
    }
}

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub student_id: Option<String>,
    pub purpose_id: String,
    pub amount: f64,
    pub remaining_amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::donations)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    pub id: Option<String>,
    pub donor_id: String,
    pub student_id: Option<String>,
    pub purpose_id: String,
    pub amount: f64,
    pub remaining_amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
}

/// Donation with its consumption summary. The remaining balance is
/// authoritative; the allocated figure is derived from it.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DonationDetails {
    #[serde(flatten)]
    pub donation: Donation,
    pub allocated: f64,
    pub remaining: f64,
}

impl From<Donation> for DonationDetails {
    fn from(donation: Donation) -> Self {
        let allocated = donation.amount - donation.remaining_amount;
        let remaining = donation.remaining_amount;
        DonationDetails {
            donation,
            allocated,
            remaining,
        }
    }
}

/// Aggregate view over the whole donation pool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationTotals {
    pub total_pledged: f64,
    pub total_remaining: f64,
    pub total_consumed: f64,
    pub donation_count: i64,
}
