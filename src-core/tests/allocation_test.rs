use std::sync::Arc;

use sanad_core::db::DbPool;
use sanad_core::donations::{DonationRepository, DonationRepositoryTrait};
use sanad_core::expenses::{
    ExpenseOutcome, ExpenseRepository, ExpenseService, ExpenseServiceTrait, NewAllocation,
    NewExpense,
};
use sanad_core::notifications::{NotificationRepository, NotificationService};

mod common;

fn expense_service(pool: &Arc<DbPool>) -> ExpenseService<ExpenseRepository> {
    let notifications = Arc::new(NotificationService::new(Arc::new(
        NotificationRepository::new(pool.clone()),
    )));
    ExpenseService::new(Arc::new(ExpenseRepository::new(pool.clone())), notifications)
}

fn vendor_expense(purpose_id: &str, amount: f64) -> NewExpense {
    NewExpense {
        id: None,
        student_id: None,
        school_id: None,
        vendor_id: Some("Stationery Supplier".to_string()),
        target_type: "VENDOR".to_string(),
        purpose_id: purpose_id.to_string(),
        amount,
        currency: None,
        payment_method: None,
        description: None,
        receipt_url: None,
        created_by_id: "case-worker-1".to_string(),
    }
}

#[test]
fn test_expense_consumes_oldest_donations_first() {
    let (_dir, pool) = common::setup_db();
    let donor_id = common::seed_donor(&pool);
    let purpose_id = common::seed_purpose(&pool);

    let older = common::confirmed_donation(&pool, &donor_id, &purpose_id, 100.0);
    common::backdate_donation(&pool, &older.id, 3600);
    let newer = common::confirmed_donation(&pool, &donor_id, &purpose_id, 200.0);

    let service = expense_service(&pool);
    let outcome = tokio_test::block_on(
        service.create_expense(vendor_expense(&purpose_id, 150.0)),
    )
    .unwrap();

    let funded = match outcome {
        ExpenseOutcome::Funded(funded) => funded,
        ExpenseOutcome::Rejected { reason } => panic!("Expected funding, got: {}", reason),
    };

    // The older donation is drained before the newer one is touched.
    assert_eq!(funded.allocations.len(), 2);
    assert_eq!(funded.allocations[0].donation_id, older.id);
    assert_eq!(funded.allocations[0].amount, 100.0);
    assert_eq!(funded.allocations[1].donation_id, newer.id);
    assert_eq!(funded.allocations[1].amount, 50.0);

    let donation_repo = DonationRepository::new(pool.clone());
    let older = donation_repo.get_by_id(&older.id).unwrap();
    let newer = donation_repo.get_by_id(&newer.id).unwrap();
    assert_eq!(older.remaining_amount, 0.0);
    assert_eq!(older.status, "USED");
    assert_eq!(newer.remaining_amount, 150.0);
    assert_eq!(newer.status, "CONFIRMED");
}

#[test]
fn test_shortfall_rejects_expense_without_side_effects() {
    let (_dir, pool) = common::setup_db();
    let donor_id = common::seed_donor(&pool);
    let purpose_id = common::seed_purpose(&pool);

    let donation = common::confirmed_donation(&pool, &donor_id, &purpose_id, 100.0);

    let service = expense_service(&pool);
    let outcome = tokio_test::block_on(
        service.create_expense(vendor_expense(&purpose_id, 300.0)),
    )
    .unwrap();

    match outcome {
        ExpenseOutcome::Rejected { reason } => {
            assert!(reason.contains("Not enough donations balance"))
        }
        ExpenseOutcome::Funded(_) => panic!("Expected rejection for an underfunded expense"),
    }

    // Nothing was written: no expense row, no partial consumption.
    assert!(service.get_expenses().unwrap().is_empty());
    let donation = DonationRepository::new(pool.clone())
        .get_by_id(&donation.id)
        .unwrap();
    assert_eq!(donation.remaining_amount, 100.0);
    assert_eq!(donation.status, "CONFIRMED");
}

#[test]
fn test_pending_donations_never_fund_expenses() {
    let (_dir, pool) = common::setup_db();
    let donor_id = common::seed_donor(&pool);
    let purpose_id = common::seed_purpose(&pool);

    let donation_repo = DonationRepository::new(pool.clone());
    donation_repo
        .insert(sanad_core::donations::NewDonation {
            id: None,
            donor_id: donor_id.clone(),
            student_id: None,
            purpose_id: purpose_id.clone(),
            amount: 1000.0,
            remaining_amount: Some(1000.0),
            currency: Some("SYP".to_string()),
            status: Some("PENDING".to_string()),
            payment_method: None,
            transaction_reference: None,
        })
        .unwrap();
    common::confirmed_donation(&pool, &donor_id, &purpose_id, 50.0);

    let service = expense_service(&pool);
    let outcome = tokio_test::block_on(
        service.create_expense(vendor_expense(&purpose_id, 100.0)),
    )
    .unwrap();

    assert!(matches!(outcome, ExpenseOutcome::Rejected { .. }));
}

#[test]
fn test_removing_allocation_restores_donation_balance() {
    let (_dir, pool) = common::setup_db();
    let donor_id = common::seed_donor(&pool);
    let purpose_id = common::seed_purpose(&pool);

    let donation = common::confirmed_donation(&pool, &donor_id, &purpose_id, 300.0);

    let service = expense_service(&pool);
    let outcome = tokio_test::block_on(
        service.create_expense(vendor_expense(&purpose_id, 300.0)),
    )
    .unwrap();
    let funded = match outcome {
        ExpenseOutcome::Funded(funded) => funded,
        ExpenseOutcome::Rejected { reason } => panic!("Expected funding, got: {}", reason),
    };

    let donation_repo = DonationRepository::new(pool.clone());
    let drained = donation_repo.get_by_id(&donation.id).unwrap();
    assert_eq!(drained.remaining_amount, 0.0);
    assert_eq!(drained.status, "USED");

    tokio_test::block_on(service.remove_allocation(&funded.allocations[0].id)).unwrap();

    let restored = donation_repo.get_by_id(&donation.id).unwrap();
    assert_eq!(restored.remaining_amount, 300.0);
    assert_eq!(restored.status, "CONFIRMED");

    let coverage = service.get_expense_coverage(&funded.expense.id).unwrap();
    assert_eq!(coverage.covered_amount, 0.0);
    assert_eq!(coverage.remaining_amount, 300.0);
}

#[test]
fn test_manual_allocation_enforces_capacity_and_uniqueness() {
    let (_dir, pool) = common::setup_db();
    let donor_id = common::seed_donor(&pool);
    let purpose_id = common::seed_purpose(&pool);

    let older = common::confirmed_donation(&pool, &donor_id, &purpose_id, 100.0);
    common::backdate_donation(&pool, &older.id, 3600);
    common::confirmed_donation(&pool, &donor_id, &purpose_id, 200.0);

    let service = expense_service(&pool);
    let outcome = tokio_test::block_on(
        service.create_expense(vendor_expense(&purpose_id, 150.0)),
    )
    .unwrap();
    let funded = match outcome {
        ExpenseOutcome::Funded(funded) => funded,
        ExpenseOutcome::Rejected { reason } => panic!("Expected funding, got: {}", reason),
    };

    // Free up the older donation so the expense has uncovered capacity again.
    tokio_test::block_on(service.remove_allocation(&funded.allocations[0].id)).unwrap();

    // Re-allocating more than the expense still needs is rejected.
    let oversized = tokio_test::block_on(service.allocate_to_expense(NewAllocation {
        donation_id: older.id.clone(),
        expense_id: funded.expense.id.clone(),
        amount: 120.0,
    }));
    assert!(oversized.is_err());

    let allocation = tokio_test::block_on(service.allocate_to_expense(NewAllocation {
        donation_id: older.id.clone(),
        expense_id: funded.expense.id.clone(),
        amount: 100.0,
    }))
    .unwrap();
    assert_eq!(allocation.amount, 100.0);

    // Same donation-expense pair twice is a conflict.
    let duplicate = tokio_test::block_on(service.allocate_to_expense(NewAllocation {
        donation_id: older.id.clone(),
        expense_id: funded.expense.id.clone(),
        amount: 10.0,
    }));
    assert!(duplicate.is_err());

    let coverage = service.get_expense_coverage(&funded.expense.id).unwrap();
    assert_eq!(coverage.covered_amount, 150.0);
    assert_eq!(coverage.percentage_covered, 100.0);
}

#[test]
fn test_financial_report_tracks_utilization() {
    let (_dir, pool) = common::setup_db();
    let donor_id = common::seed_donor(&pool);
    let purpose_id = common::seed_purpose(&pool);

    common::confirmed_donation(&pool, &donor_id, &purpose_id, 200.0);

    let service = expense_service(&pool);
    let outcome = tokio_test::block_on(
        service.create_expense(vendor_expense(&purpose_id, 150.0)),
    )
    .unwrap();
    assert!(matches!(outcome, ExpenseOutcome::Funded(_)));

    let report = service.get_financial_report().unwrap();
    assert_eq!(report.total_donations, 200.0);
    assert_eq!(report.total_expenses, 150.0);
    assert_eq!(report.total_allocated, 150.0);
    assert_eq!(report.remaining_balance, 50.0);
    assert_eq!(report.utilization_rate, 75.0);
}
