use crate::errors::Result;
use crate::scoring::scoring_model::{
    Classification, Criteria, NewCriteria, RecalculationSummary, ScoreResult, StudentCriterion,
};
use crate::students::Student;

/// Trait for scoring repository operations
pub trait ScoringRepositoryTrait: Send + Sync {
    fn list_criteria(&self) -> Result<Vec<Criteria>>;
    fn get_criteria(&self, criteria_id: &str) -> Result<Criteria>;
    fn insert_criteria(&self, new_criteria: NewCriteria) -> Result<Criteria>;
    fn delete_criteria(&self, criteria_id: &str) -> Result<usize>;

    fn get_student(&self, student_id: &str) -> Result<Student>;
    fn list_students(&self) -> Result<Vec<Student>>;

    fn values_for_student(&self, student_id: &str) -> Result<Vec<StudentCriterion>>;
    fn upsert_student_value(&self, student_id: &str, criteria_id: &str, value: f64) -> Result<()>;

    fn get_classification(&self, student_id: &str) -> Result<Option<Classification>>;
    fn upsert_classification(
        &self,
        student_id: &str,
        total_score: i32,
        label: &str,
    ) -> Result<Classification>;
}

/// Trait for scoring service operations
#[async_trait::async_trait]
pub trait ScoringServiceTrait: Send + Sync {
    fn get_criteria_list(&self) -> Result<Vec<Criteria>>;
    async fn create_criteria(&self, new_criteria: NewCriteria) -> Result<Criteria>;
    async fn delete_criteria(&self, criteria_id: &str) -> Result<usize>;

    fn get_classification(&self, student_id: &str) -> Result<Option<Classification>>;
    async fn compute_student_score(&self, student_id: &str) -> Result<ScoreResult>;
    async fn classify_student(&self, student_id: &str) -> Result<ScoreResult>;
    async fn recalculate_all(&self) -> Result<RecalculationSummary>;
}
