use chrono::NaiveDateTime;
use sanad_core::donations as core_donations;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
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

impl From<core_donations::Donation> for Donation {
    fn from(d: core_donations::Donation) -> Self {
        Self {
            id: d.id,
            donor_id: d.donor_id,
            student_id: d.student_id,
            purpose_id: d.purpose_id,
            amount: d.amount,
            remaining_amount: d.remaining_amount,
            currency: d.currency,
            status: d.status,
            payment_method: d.payment_method,
            transaction_reference: d.transaction_reference,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDonationRequest {
    pub donor_id: String,
    pub student_id: Option<String>,
    pub purpose_id: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
}

impl From<NewDonationRequest> for core_donations::NewDonation {
    fn from(d: NewDonationRequest) -> Self {
        Self {
            id: None,
            donor_id: d.donor_id,
            student_id: d.student_id,
            purpose_id: d.purpose_id,
            amount: d.amount,
            remaining_amount: None,
            currency: d.currency,
            status: None,
            payment_method: d.payment_method,
            transaction_reference: None,
        }
    }
}
