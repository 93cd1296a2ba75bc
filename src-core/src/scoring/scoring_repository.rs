use std::sync::Arc;

use chrono::Utc;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::{classifications, criteria, student_criteria, students};
use crate::scoring::scoring_model::{Classification, Criteria, NewCriteria, StudentCriterion};
use crate::scoring::scoring_traits::ScoringRepositoryTrait;
use crate::students::Student;

pub struct ScoringRepository {
    pool: Arc<DbPool>,
}

impl ScoringRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ScoringRepository { pool }
    }
}

impl ScoringRepositoryTrait for ScoringRepository {
    fn list_criteria(&self) -> Result<Vec<Criteria>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(criteria::table
            .order(criteria::created_at.asc())
            .load::<Criteria>(&mut conn)?)
    }

    fn get_criteria(&self, criteria_id: &str) -> Result<Criteria> {
        let mut conn = get_connection(&self.pool)?;
        criteria::table
            .find(criteria_id)
            .first::<Criteria>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Criteria {}", criteria_id)))
    }

    fn insert_criteria(&self, mut new_criteria: NewCriteria) -> Result<Criteria> {
        let mut conn = get_connection(&self.pool)?;
        new_criteria.id = Some(uuid::Uuid::new_v4().to_string());
        new_criteria.weight.get_or_insert(1.0);

        Ok(diesel::insert_into(criteria::table)
            .values(&new_criteria)
            .returning(criteria::all_columns)
            .get_result(&mut conn)?)
    }

    fn delete_criteria(&self, criteria_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(criteria::table.find(criteria_id)).execute(&mut conn)?)
    }

    fn get_student(&self, student_id: &str) -> Result<Student> {
        let mut conn = get_connection(&self.pool)?;
        students::table
            .find(student_id)
            .first::<Student>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Student {}", student_id)))
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(students::table
            .order(students::created_at.asc())
            .load::<Student>(&mut conn)?)
    }

    fn values_for_student(&self, student_id: &str) -> Result<Vec<StudentCriterion>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(student_criteria::table
            .filter(student_criteria::student_id.eq(student_id))
            .load::<StudentCriterion>(&mut conn)?)
    }

    fn upsert_student_value(&self, student_id: &str, criteria_id: &str, value: f64) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();

        diesel::insert_into(student_criteria::table)
            .values((
                student_criteria::id.eq(uuid::Uuid::new_v4().to_string()),
                student_criteria::student_id.eq(student_id),
                student_criteria::criteria_id.eq(criteria_id),
                student_criteria::value.eq(value),
                student_criteria::updated_at.eq(now),
            ))
            .on_conflict((student_criteria::student_id, student_criteria::criteria_id))
            .do_update()
            .set((
                student_criteria::value.eq(value),
                student_criteria::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn get_classification(&self, student_id: &str) -> Result<Option<Classification>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(classifications::table
            .filter(classifications::student_id.eq(student_id))
            .first::<Classification>(&mut conn)
            .optional()?)
    }

    fn upsert_classification(
        &self,
        student_id: &str,
        total_score: i32,
        label: &str,
    ) -> Result<Classification> {
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();

        diesel::insert_into(classifications::table)
            .values((
                classifications::id.eq(uuid::Uuid::new_v4().to_string()),
                classifications::student_id.eq(student_id),
                classifications::total_score.eq(total_score),
                classifications::label.eq(label),
                classifications::computed_at.eq(now),
            ))
            .on_conflict(classifications::student_id)
            .do_update()
            .set((
                classifications::total_score.eq(total_score),
                classifications::label.eq(label),
                classifications::computed_at.eq(now),
            ))
            .execute(&mut conn)?;

        Ok(classifications::table
            .filter(classifications::student_id.eq(student_id))
            .first(&mut conn)?)
    }
}
