use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::{follow_up_visits, guardians, students};
use crate::visits::visits_model::{FollowUpVisit, NewFollowUpVisit};
use crate::visits::visits_traits::VisitRepositoryTrait;

pub struct VisitRepository {
    pool: Arc<DbPool>,
}

impl VisitRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        VisitRepository { pool }
    }
}

impl VisitRepositoryTrait for VisitRepository {
    fn insert(&self, mut new_visit: NewFollowUpVisit) -> Result<FollowUpVisit> {
        let mut conn = get_connection(&self.pool)?;
        new_visit.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(follow_up_visits::table)
            .values(&new_visit)
            .returning(follow_up_visits::all_columns)
            .get_result(&mut conn)?)
    }

    fn list(&self) -> Result<Vec<FollowUpVisit>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(follow_up_visits::table
            .order(follow_up_visits::visit_date.desc())
            .load::<FollowUpVisit>(&mut conn)?)
    }

    fn list_by_student(&self, student_id: &str) -> Result<Vec<FollowUpVisit>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(follow_up_visits::table
            .filter(follow_up_visits::student_id.eq(student_id))
            .order(follow_up_visits::visit_date.desc())
            .load::<FollowUpVisit>(&mut conn)?)
    }

    fn student_exists(&self, student_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let found: Option<String> = students::table
            .find(student_id)
            .select(students::id)
            .first(&mut conn)
            .optional()?;
        Ok(found.is_some())
    }

    fn guardian_exists(&self, guardian_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let found: Option<String> = guardians::table
            .find(guardian_id)
            .select(guardians::id)
            .first(&mut conn)
            .optional()?;
        Ok(found.is_some())
    }
}
