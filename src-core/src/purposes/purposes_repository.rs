use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::purposes::purposes_model::{DonationPurpose, NewDonationPurpose};
use crate::schema::donation_purposes;

pub struct PurposeRepository {
    pool: Arc<DbPool>,
}

impl PurposeRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PurposeRepository { pool }
    }

    pub fn list(&self) -> Result<Vec<DonationPurpose>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donation_purposes::table.load::<DonationPurpose>(&mut conn)?)
    }

    pub fn get_by_id(&self, purpose_id: &str) -> Result<DonationPurpose> {
        let mut conn = get_connection(&self.pool)?;
        donation_purposes::table
            .find(purpose_id)
            .first::<DonationPurpose>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Donation purpose {}", purpose_id)))
    }

    pub fn insert(&self, mut new_purpose: NewDonationPurpose) -> Result<DonationPurpose> {
        let mut conn = get_connection(&self.pool)?;
        new_purpose.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(donation_purposes::table)
            .values(&new_purpose)
            .returning(donation_purposes::all_columns)
            .get_result(&mut conn)?)
    }
}
