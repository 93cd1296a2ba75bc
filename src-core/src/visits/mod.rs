pub mod visits_model;
pub mod visits_repository;
pub mod visits_service;
pub mod visits_traits;

pub use visits_model::{FollowUpVisit, NewFollowUpVisit};
pub use visits_repository::VisitRepository;
pub use visits_service::VisitService;
pub use visits_traits::{VisitRepositoryTrait, VisitServiceTrait};
