use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::errors::Result;
use crate::scoring::engine::{aggregate, derive_value};
use crate::scoring::scoring_model::{
    Classification, Criteria, NewCriteria, RecalculationSummary, ScoreResult, StudentScoreSummary,
};
use crate::scoring::scoring_traits::{ScoringRepositoryTrait, ScoringServiceTrait};
use crate::students::Student;

pub struct ScoringService<T: ScoringRepositoryTrait> {
    repo: Arc<T>,
}

impl<T: ScoringRepositoryTrait> ScoringService<T> {
    pub fn new(repo: Arc<T>) -> Self {
        ScoringService { repo }
    }

    /// Scores one student against a fixed criteria snapshot. The snapshot is
    /// loaded once per invocation (and once per bulk batch) so concurrent
    /// criteria edits cannot drift scores mid-computation.
    fn compute_with_snapshot(
        &self,
        student: &Student,
        snapshot: &[Criteria],
    ) -> Result<ScoreResult> {
        let explicit: HashMap<String, f64> = self
            .repo
            .values_for_student(&student.id)?
            .into_iter()
            .map(|sc| (sc.criteria_id, sc.value))
            .collect();

        let mut values = Vec::with_capacity(snapshot.len());
        for criteria in snapshot {
            let raw = if let Some(stored) = explicit.get(&criteria.id) {
                *stored
            } else if let Some(derived) = derive_value(criteria, student) {
                // Cache the derived value so later recomputes stay consistent
                // even if the profile field changes underneath.
                self.repo
                    .upsert_student_value(&student.id, &criteria.id, derived)?;
                derived
            } else {
                0.0
            };
            values.push((criteria.clone(), raw));
        }

        let (total_score, label, breakdown) = aggregate(&values);
        debug!(
            "Scored student {}: {} ({})",
            student.id,
            total_score,
            label.as_str()
        );

        Ok(ScoreResult {
            student_id: student.id.clone(),
            total_score,
            label: label.as_str().to_string(),
            breakdown,
        })
    }
}

#[async_trait]
impl<T: ScoringRepositoryTrait> ScoringServiceTrait for ScoringService<T> {
    fn get_criteria_list(&self) -> Result<Vec<Criteria>> {
        self.repo.list_criteria()
    }

    async fn create_criteria(&self, new_criteria: NewCriteria) -> Result<Criteria> {
        new_criteria.validate()?;
        self.repo.insert_criteria(new_criteria)
    }

    async fn delete_criteria(&self, criteria_id: &str) -> Result<usize> {
        self.repo.get_criteria(criteria_id)?;
        // Deleting a criterion does not rescore anyone until a recompute runs.
        self.repo.delete_criteria(criteria_id)
    }

    fn get_classification(&self, student_id: &str) -> Result<Option<Classification>> {
        self.repo.get_classification(student_id)
    }

    async fn compute_student_score(&self, student_id: &str) -> Result<ScoreResult> {
        let student = self.repo.get_student(student_id)?;
        let snapshot = self.repo.list_criteria()?;
        self.compute_with_snapshot(&student, &snapshot)
    }

    async fn classify_student(&self, student_id: &str) -> Result<ScoreResult> {
        let result = self.compute_student_score(student_id).await?;
        self.repo
            .upsert_classification(student_id, result.total_score, &result.label)?;
        Ok(result)
    }

    /// Sequential, one classification upsert per student. Not transactional
    /// across the batch: a mid-batch failure leaves earlier students updated.
    async fn recalculate_all(&self) -> Result<RecalculationSummary> {
        let students = self.repo.list_students()?;
        let snapshot = self.repo.list_criteria()?;

        let mut updated = Vec::with_capacity(students.len());
        for student in &students {
            let result = self.compute_with_snapshot(student, &snapshot)?;
            self.repo
                .upsert_classification(&student.id, result.total_score, &result.label)?;
            updated.push(StudentScoreSummary {
                student_id: student.id.clone(),
                score: result.total_score,
                label: result.label,
            });
        }

        info!("Recalculated risk scores for {} students", updated.len());
        Ok(RecalculationSummary {
            total_students: updated.len(),
            updated,
        })
    }
}
