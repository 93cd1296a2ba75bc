use std::sync::Arc;

use chrono::Utc;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::donations::donations_model::{Donation, DonationStatus, DonationTotals, NewDonation};
use crate::donations::donations_traits::DonationRepositoryTrait;
use crate::errors::{Error, Result};
use crate::schema::donations;

pub struct DonationRepository {
    pool: Arc<DbPool>,
}

impl DonationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        DonationRepository { pool }
    }
}

impl DonationRepositoryTrait for DonationRepository {
    fn list(&self) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donations::table
            .order(donations::created_at.desc())
            .load::<Donation>(&mut conn)?)
    }

    fn get_by_id(&self, donation_id: &str) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        donations::table
            .find(donation_id)
            .first::<Donation>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Donation {}", donation_id)))
    }

    fn list_by_donor(&self, donor_id: &str) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donations::table
            .filter(donations::donor_id.eq(donor_id))
            .order(donations::created_at.desc())
            .load::<Donation>(&mut conn)?)
    }

    fn list_by_student(&self, student_id: &str) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donations::table
            .filter(donations::student_id.eq(student_id))
            .order(donations::created_at.desc())
            .load::<Donation>(&mut conn)?)
    }

    fn insert(&self, mut new_donation: NewDonation) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        new_donation.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(donations::table)
            .values(&new_donation)
            .returning(donations::all_columns)
            .get_result(&mut conn)?)
    }

    fn set_status(&self, donation_id: &str, status: DonationStatus) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        let updated = diesel::update(donations::table.find(donation_id))
            .set((
                donations::status.eq(status.as_str()),
                donations::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Donation {}", donation_id)));
        }

        Ok(donations::table.find(donation_id).first(&mut conn)?)
    }

    fn totals(&self) -> Result<DonationTotals> {
        let mut conn = get_connection(&self.pool)?;
        let (pledged, remaining, count): (Option<f64>, Option<f64>, i64) = donations::table
            .select((
                sum(donations::amount),
                sum(donations::remaining_amount),
                count_star(),
            ))
            .first(&mut conn)?;

        let total_pledged = pledged.unwrap_or(0.0);
        let total_remaining = remaining.unwrap_or(0.0);
        Ok(DonationTotals {
            total_pledged,
            total_remaining,
            total_consumed: total_pledged - total_remaining,
            donation_count: count,
        })
    }
}
