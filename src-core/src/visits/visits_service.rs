use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use crate::errors::{Error, Result};
use crate::notifications::{NewNotification, NotificationServiceTrait, KIND_USER_ALERT};
use crate::visits::visits_model::{FollowUpVisit, NewFollowUpVisit};
use crate::visits::visits_traits::{VisitRepositoryTrait, VisitServiceTrait};

pub struct VisitService<T: VisitRepositoryTrait> {
    repo: Arc<T>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl<T: VisitRepositoryTrait> VisitService<T> {
    pub fn new(repo: Arc<T>, notifications: Arc<dyn NotificationServiceTrait>) -> Self {
        VisitService {
            repo,
            notifications,
        }
    }
}

#[async_trait]
impl<T: VisitRepositoryTrait> VisitServiceTrait for VisitService<T> {
    fn get_visits(&self) -> Result<Vec<FollowUpVisit>> {
        self.repo.list()
    }

    fn get_visits_by_student(&self, student_id: &str) -> Result<Vec<FollowUpVisit>> {
        self.repo.list_by_student(student_id)
    }

    async fn create_visit(&self, new_visit: NewFollowUpVisit) -> Result<FollowUpVisit> {
        if !self.repo.student_exists(&new_visit.student_id)? {
            return Err(Error::NotFound(format!("Student {}", new_visit.student_id)));
        }
        if let Some(guardian_id) = &new_visit.guardian_id {
            if !self.repo.guardian_exists(guardian_id)? {
                return Err(Error::NotFound(format!("Guardian {}", guardian_id)));
            }
        }

        let visit = self.repo.insert(new_visit)?;

        let result = self.notifications.create(NewNotification {
            id: None,
            recipient_ref: visit.user_ref.clone(),
            title: "Follow-up Visit Scheduled".to_string(),
            message: format!("You have a follow-up visit on {}", visit.visit_date),
            kind: KIND_USER_ALERT.to_string(),
        });
        if let Err(e) = result {
            warn!("Failed to send visit notification: {}", e);
        }

        Ok(visit)
    }
}
