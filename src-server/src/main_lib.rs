use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use sanad_core::{
    db,
    donations::{DonationRepository, DonationService, DonationServiceTrait},
    donors::DonorRepository,
    expenses::{ExpenseRepository, ExpenseService, ExpenseServiceTrait},
    guardians::GuardianRepository,
    notifications::{NotificationRepository, NotificationService, NotificationServiceTrait},
    purposes::PurposeRepository,
    schools::SchoolRepository,
    scoring::{ScoringRepository, ScoringService, ScoringServiceTrait},
    students::{StudentRepository, StudentService, StudentServiceTrait},
    visits::{VisitRepository, VisitService, VisitServiceTrait},
};

use crate::config::Config;

pub struct AppState {
    pub student_service: Arc<dyn StudentServiceTrait>,
    pub donation_service: Arc<dyn DonationServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub scoring_service: Arc<dyn ScoringServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub visit_service: Arc<dyn VisitServiceTrait>,
    pub donor_repository: Arc<DonorRepository>,
    pub purpose_repository: Arc<PurposeRepository>,
    pub guardian_repository: Arc<GuardianRepository>,
    pub school_repository: Arc<SchoolRepository>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let notification_service: Arc<dyn NotificationServiceTrait> = Arc::new(
        NotificationService::new(Arc::new(NotificationRepository::new(pool.clone()))),
    );

    let student_service: Arc<dyn StudentServiceTrait> = Arc::new(StudentService::new(Arc::new(
        StudentRepository::new(pool.clone()),
    )));

    let donation_service: Arc<dyn DonationServiceTrait> = Arc::new(DonationService::new(
        Arc::new(DonationRepository::new(pool.clone())),
        notification_service.clone(),
    ));

    let expense_service: Arc<dyn ExpenseServiceTrait> = Arc::new(ExpenseService::new(
        Arc::new(ExpenseRepository::new(pool.clone())),
        notification_service.clone(),
    ));

    let scoring_service: Arc<dyn ScoringServiceTrait> = Arc::new(ScoringService::new(Arc::new(
        ScoringRepository::new(pool.clone()),
    )));

    let visit_service: Arc<dyn VisitServiceTrait> = Arc::new(VisitService::new(
        Arc::new(VisitRepository::new(pool.clone())),
        notification_service.clone(),
    ));

    Ok(Arc::new(AppState {
        student_service,
        donation_service,
        expense_service,
        scoring_service,
        notification_service,
        visit_service,
        donor_repository: Arc::new(DonorRepository::new(pool.clone())),
        purpose_repository: Arc::new(PurposeRepository::new(pool.clone())),
        guardian_repository: Arc::new(GuardianRepository::new(pool.clone())),
        school_repository: Arc::new(SchoolRepository::new(pool)),
    }))
}
