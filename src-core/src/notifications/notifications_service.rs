use std::sync::Arc;

use crate::errors::Result;
use crate::notifications::notifications_model::{NewNotification, Notification};
use crate::notifications::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait,
};

pub struct NotificationService<T: NotificationRepositoryTrait> {
    repo: Arc<T>,
}

impl<T: NotificationRepositoryTrait> NotificationService<T> {
    pub fn new(repo: Arc<T>) -> Self {
        NotificationService { repo }
    }
}

impl<T: NotificationRepositoryTrait + Send + Sync> NotificationServiceTrait
    for NotificationService<T>
{
    fn create(&self, new_notification: NewNotification) -> Result<Notification> {
        self.repo.insert(new_notification)
    }

    fn get_for_recipient(&self, recipient_ref: &str) -> Result<Vec<Notification>> {
        self.repo.list_for_recipient(recipient_ref)
    }

    fn mark_read(&self, notification_id: &str) -> Result<usize> {
        self.repo.mark_read(notification_id)
    }
}
