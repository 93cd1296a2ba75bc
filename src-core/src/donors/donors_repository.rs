use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::donors::donors_model::{Donor, NewDonor};
use crate::errors::{Error, Result};
use crate::schema::donors;

pub struct DonorRepository {
    pool: Arc<DbPool>,
}

impl DonorRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        DonorRepository { pool }
    }

    pub fn list(&self) -> Result<Vec<Donor>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donors::table.load::<Donor>(&mut conn)?)
    }

    pub fn get_by_id(&self, donor_id: &str) -> Result<Donor> {
        let mut conn = get_connection(&self.pool)?;
        donors::table
            .find(donor_id)
            .first::<Donor>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Donor {}", donor_id)))
    }

    pub fn insert(&self, mut new_donor: NewDonor) -> Result<Donor> {
        let mut conn = get_connection(&self.pool)?;
        new_donor.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(donors::table)
            .values(&new_donor)
            .returning(donors::all_columns)
            .get_result(&mut conn)?)
    }

    pub fn delete(&self, donor_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(donors::table.find(donor_id)).execute(&mut conn)?)
    }
}
