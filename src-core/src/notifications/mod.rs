pub mod notifications_model;
pub mod notifications_repository;
pub mod notifications_service;
pub mod notifications_traits;

pub use notifications_model::{NewNotification, Notification, KIND_DONOR_ALERT, KIND_USER_ALERT};
pub use notifications_repository::NotificationRepository;
pub use notifications_service::NotificationService;
pub use notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
