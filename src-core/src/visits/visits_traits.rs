use crate::errors::Result;
use crate::visits::visits_model::{FollowUpVisit, NewFollowUpVisit};

/// Trait for follow-up visit repository operations
pub trait VisitRepositoryTrait: Send + Sync {
    fn insert(&self, new_visit: NewFollowUpVisit) -> Result<FollowUpVisit>;
    fn list(&self) -> Result<Vec<FollowUpVisit>>;
    fn list_by_student(&self, student_id: &str) -> Result<Vec<FollowUpVisit>>;
    fn student_exists(&self, student_id: &str) -> Result<bool>;
    fn guardian_exists(&self, guardian_id: &str) -> Result<bool>;
}

/// Trait for follow-up visit service operations
#[async_trait::async_trait]
pub trait VisitServiceTrait: Send + Sync {
    fn get_visits(&self) -> Result<Vec<FollowUpVisit>>;
    fn get_visits_by_student(&self, student_id: &str) -> Result<Vec<FollowUpVisit>>;
    async fn create_visit(&self, new_visit: NewFollowUpVisit) -> Result<FollowUpVisit>;
}
