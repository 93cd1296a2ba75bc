use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::schools;
use crate::schools::schools_model::{NewSchool, School};

pub struct SchoolRepository {
    pool: Arc<DbPool>,
}

impl SchoolRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SchoolRepository { pool }
    }

    pub fn list(&self) -> Result<Vec<School>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(schools::table.load::<School>(&mut conn)?)
    }

    pub fn get_by_id(&self, school_id: &str) -> Result<School> {
        let mut conn = get_connection(&self.pool)?;
        schools::table
            .find(school_id)
            .first::<School>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("School {}", school_id)))
    }

    pub fn insert(&self, mut new_school: NewSchool) -> Result<School> {
        let mut conn = get_connection(&self.pool)?;
        new_school.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(schools::table)
            .values(&new_school)
            .returning(schools::all_columns)
            .get_result(&mut conn)?)
    }
}
