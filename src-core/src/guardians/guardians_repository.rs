use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::guardians::guardians_model::{Guardian, NewGuardian};
use crate::schema::guardians;

pub struct GuardianRepository {
    pool: Arc<DbPool>,
}

impl GuardianRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        GuardianRepository { pool }
    }

    pub fn list(&self) -> Result<Vec<Guardian>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(guardians::table.load::<Guardian>(&mut conn)?)
    }

    pub fn get_by_id(&self, guardian_id: &str) -> Result<Guardian> {
        let mut conn = get_connection(&self.pool)?;
        guardians::table
            .find(guardian_id)
            .first::<Guardian>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Guardian {}", guardian_id)))
    }

    pub fn insert(&self, mut new_guardian: NewGuardian) -> Result<Guardian> {
        let mut conn = get_connection(&self.pool)?;
        new_guardian.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(guardians::table)
            .values(&new_guardian)
            .returning(guardians::all_columns)
            .get_result(&mut conn)?)
    }

    pub fn delete(&self, guardian_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(guardians::table.find(guardian_id)).execute(&mut conn)?)
    }
}
