use crate::errors::Result;
use crate::notifications::notifications_model::{NewNotification, Notification};

/// Trait for notification repository operations
pub trait NotificationRepositoryTrait: Send + Sync {
    fn insert(&self, new_notification: NewNotification) -> Result<Notification>;
    fn list_for_recipient(&self, recipient_ref: &str) -> Result<Vec<Notification>>;
    fn mark_read(&self, notification_id: &str) -> Result<usize>;
}

/// Notification sink consumed by the financial and visit flows. Deliveries are
/// best-effort: callers log failures instead of propagating them.
pub trait NotificationServiceTrait: Send + Sync {
    fn create(&self, new_notification: NewNotification) -> Result<Notification>;
    fn get_for_recipient(&self, recipient_ref: &str) -> Result<Vec<Notification>>;
    fn mark_read(&self, notification_id: &str) -> Result<usize>;
}
