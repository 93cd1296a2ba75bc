use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::notifications::notifications_model::{NewNotification, Notification};
use crate::notifications::notifications_traits::NotificationRepositoryTrait;
use crate::schema::notifications;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        NotificationRepository { pool }
    }
}

impl NotificationRepositoryTrait for NotificationRepository {
    fn insert(&self, mut new_notification: NewNotification) -> Result<Notification> {
        let mut conn = get_connection(&self.pool)?;
        new_notification.id = Some(uuid::Uuid::new_v4().to_string());

        Ok(diesel::insert_into(notifications::table)
            .values(&new_notification)
            .returning(notifications::all_columns)
            .get_result(&mut conn)?)
    }

    fn list_for_recipient(&self, recipient_ref: &str) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(notifications::table
            .filter(notifications::recipient_ref.eq(recipient_ref))
            .order(notifications::created_at.desc())
            .load::<Notification>(&mut conn)?)
    }

    fn mark_read(&self, notification_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::update(notifications::table.find(notification_id))
            .set(notifications::is_read.eq(true))
            .execute(&mut conn)?)
    }
}
