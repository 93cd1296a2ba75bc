use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use sanad_core::{
    donations::{DonationDetails, DonationTotals},
    donors::{Donor, NewDonor},
    expenses::{
        AllocationSummary, DonationExpenseAllocation, ExpenseCoverage, ExpenseOutcome,
        ExpenseWithAllocations, FinancialReport, NewAllocation, NewExpense,
    },
    guardians::{Guardian, NewGuardian},
    notifications::Notification,
    purposes::{DonationPurpose, NewDonationPurpose},
    schools::{NewSchool, School},
    scoring::{Classification, Criteria, NewCriteria, RecalculationSummary, ScoreResult},
    students::{NewStudent, Student},
    visits::{FollowUpVisit, NewFollowUpVisit},
};

use crate::{
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    models::{Donation, NewDonationRequest},
};

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

// ===================== Students =====================

async fn list_students(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(state.student_service.get_students()?))
}

async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewStudent>,
) -> ApiResult<Json<Student>> {
    Ok(Json(state.student_service.create_student(payload).await?))
}

async fn get_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Student>> {
    Ok(Json(state.student_service.get_student(&id)?))
}

async fn update_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<Student>,
) -> ApiResult<Json<Student>> {
    payload.id = id;
    Ok(Json(state.student_service.update_student(payload).await?))
}

async fn delete_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<()> {
    state.student_service.delete_student(&id).await?;
    Ok(())
}

async fn get_student_donations(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Donation>>> {
    let donations = state.donation_service.get_donations_by_student(&id)?;
    Ok(Json(donations.into_iter().map(Donation::from).collect()))
}

async fn get_student_expenses(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExpenseWithAllocations>>> {
    Ok(Json(state.expense_service.get_expenses_by_student(&id)?))
}

async fn get_student_visits(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FollowUpVisit>>> {
    Ok(Json(state.visit_service.get_visits_by_student(&id)?))
}

// ===================== Scoring =====================

async fn get_student_score(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ScoreResult>> {
    Ok(Json(state.scoring_service.compute_student_score(&id).await?))
}

async fn classify_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ScoreResult>> {
    Ok(Json(state.scoring_service.classify_student(&id).await?))
}

async fn get_student_classification(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<Classification>>> {
    Ok(Json(state.scoring_service.get_classification(&id)?))
}

async fn list_criteria(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Criteria>>> {
    Ok(Json(state.scoring_service.get_criteria_list()?))
}

async fn create_criteria(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCriteria>,
) -> ApiResult<Json<Criteria>> {
    Ok(Json(state.scoring_service.create_criteria(payload).await?))
}

async fn delete_criteria(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<()> {
    state.scoring_service.delete_criteria(&id).await?;
    Ok(())
}

async fn recalculate_scores(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RecalculationSummary>> {
    Ok(Json(state.scoring_service.recalculate_all().await?))
}

// ===================== Guardians / Schools =====================

async fn list_guardians(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Guardian>>> {
    Ok(Json(state.guardian_repository.list()?))
}

async fn create_guardian(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewGuardian>,
) -> ApiResult<Json<Guardian>> {
    Ok(Json(state.guardian_repository.insert(payload)?))
}

async fn get_guardian(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Guardian>> {
    Ok(Json(state.guardian_repository.get_by_id(&id)?))
}

async fn list_schools(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<School>>> {
    Ok(Json(state.school_repository.list()?))
}

async fn create_school(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewSchool>,
) -> ApiResult<Json<School>> {
    Ok(Json(state.school_repository.insert(payload)?))
}

async fn get_school(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<School>> {
    Ok(Json(state.school_repository.get_by_id(&id)?))
}

// ===================== Donors / Purposes =====================

async fn list_donors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Donor>>> {
    Ok(Json(state.donor_repository.list()?))
}

async fn create_donor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewDonor>,
) -> ApiResult<Json<Donor>> {
    Ok(Json(state.donor_repository.insert(payload)?))
}

async fn get_donor(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Donor>> {
    Ok(Json(state.donor_repository.get_by_id(&id)?))
}

async fn get_donor_donations(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Donation>>> {
    let donations = state.donation_service.get_donations_by_donor(&id)?;
    Ok(Json(donations.into_iter().map(Donation::from).collect()))
}

async fn list_purposes(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DonationPurpose>>> {
    Ok(Json(state.purpose_repository.list()?))
}

async fn create_purpose(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewDonationPurpose>,
) -> ApiResult<Json<DonationPurpose>> {
    Ok(Json(state.purpose_repository.insert(payload)?))
}

// ===================== Donations =====================

#[utoipa::path(get, path = "/api/v1/donations", responses((status = 200, body = [Donation])))]
async fn list_donations(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Donation>>> {
    let donations = state.donation_service.get_donations()?;
    Ok(Json(donations.into_iter().map(Donation::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/donations", request_body = NewDonationRequest, responses((status = 200, body = Donation)))]
async fn create_donation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewDonationRequest>,
) -> ApiResult<Json<Donation>> {
    let created = state.donation_service.create_donation(payload.into()).await?;
    Ok(Json(Donation::from(created)))
}

#[utoipa::path(post, path = "/api/v1/donations/simulate-payment", request_body = NewDonationRequest, responses((status = 200, body = Donation)))]
async fn simulate_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewDonationRequest>,
) -> ApiResult<Json<Donation>> {
    let pending = state.donation_service.simulate_payment(payload.into()).await?;
    Ok(Json(Donation::from(pending)))
}

#[utoipa::path(post, path = "/api/v1/donations/{id}/confirm", responses((status = 200, body = Donation)))]
async fn confirm_donation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Donation>> {
    let confirmed = state.donation_service.confirm_donation(&id).await?;
    Ok(Json(Donation::from(confirmed)))
}

async fn get_donation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DonationDetails>> {
    Ok(Json(state.donation_service.get_donation(&id)?))
}

async fn get_donation_allocations(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AllocationSummary>> {
    Ok(Json(state.expense_service.get_donation_allocations(&id)?))
}

async fn get_donation_totals(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DonationTotals>> {
    Ok(Json(state.donation_service.get_totals()?))
}

// ===================== Expenses / Allocations =====================

async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExpenseWithAllocations>>> {
    Ok(Json(state.expense_service.get_expenses()?))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewExpense>,
) -> ApiResult<Json<ExpenseOutcome>> {
    Ok(Json(state.expense_service.create_expense(payload).await?))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ExpenseWithAllocations>> {
    Ok(Json(state.expense_service.get_expense(&id)?))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<()> {
    state.expense_service.delete_expense(&id).await?;
    Ok(())
}

async fn get_expense_coverage(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ExpenseCoverage>> {
    Ok(Json(state.expense_service.get_expense_coverage(&id)?))
}

async fn create_allocation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAllocation>,
) -> ApiResult<Json<DonationExpenseAllocation>> {
    Ok(Json(state.expense_service.allocate_to_expense(payload).await?))
}

async fn remove_allocation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<()> {
    state.expense_service.remove_allocation(&id).await?;
    Ok(())
}

async fn get_financial_report(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<FinancialReport>> {
    Ok(Json(state.expense_service.get_financial_report()?))
}

// ===================== Notifications / Visits =====================

async fn list_notifications(
    Path(recipient): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(state.notification_service.get_for_recipient(&recipient)?))
}

async fn mark_notification_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<()> {
    state.notification_service.mark_read(&id)?;
    Ok(())
}

async fn list_visits(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FollowUpVisit>>> {
    Ok(Json(state.visit_service.get_visits()?))
}

async fn create_visit(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewFollowUpVisit>,
) -> ApiResult<Json<FollowUpVisit>> {
    Ok(Json(state.visit_service.create_visit(payload).await?))
}

#[derive(OpenApi)]
#[openapi(
    paths(healthz, readyz, list_donations, create_donation, simulate_payment, confirm_donation),
    components(schemas(Donation, NewDonationRequest)),
    tags((name = "sanad"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/{id}/donations", get(get_student_donations))
        .route("/students/{id}/expenses", get(get_student_expenses))
        .route("/students/{id}/visits", get(get_student_visits))
        .route("/students/{id}/score", get(get_student_score))
        .route("/students/{id}/classify", post(classify_student))
        .route(
            "/students/{id}/classification",
            get(get_student_classification),
        )
        .route("/guardians", get(list_guardians).post(create_guardian))
        .route("/guardians/{id}", get(get_guardian))
        .route("/schools", get(list_schools).post(create_school))
        .route("/schools/{id}", get(get_school))
        .route("/donors", get(list_donors).post(create_donor))
        .route("/donors/{id}", get(get_donor))
        .route("/donors/{id}/donations", get(get_donor_donations))
        .route("/purposes", get(list_purposes).post(create_purpose))
        .route("/donations", get(list_donations).post(create_donation))
        .route("/donations/totals", get(get_donation_totals))
        .route("/donations/simulate-payment", post(simulate_payment))
        .route("/donations/{id}", get(get_donation))
        .route("/donations/{id}/confirm", post(confirm_donation))
        .route("/donations/{id}/allocations", get(get_donation_allocations))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).delete(delete_expense))
        .route("/expenses/{id}/coverage", get(get_expense_coverage))
        .route("/allocations", post(create_allocation))
        .route("/allocations/{id}", delete(remove_allocation))
        .route("/reports/financial", get(get_financial_report))
        .route(
            "/scoring/criteria",
            get(list_criteria).post(create_criteria),
        )
        .route("/scoring/criteria/{id}", delete(delete_criteria))
        .route("/scoring/recalculate", post(recalculate_scores))
        .route("/notifications/{recipient}", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_notification_read))
        .route("/visits", get(list_visits).post(create_visit));

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
