#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use diesel::prelude::*;
use tempfile::TempDir;

use sanad_core::db::{self, DbPool};
use sanad_core::donations::{Donation, DonationRepository, DonationRepositoryTrait, NewDonation};
use sanad_core::donors::{DonorRepository, NewDonor};
use sanad_core::purposes::{NewDonationPurpose, PurposeRepository};
use sanad_core::schema::donations;
use sanad_core::students::{NewStudent, Student, StudentRepository, StudentRepositoryTrait};

/// Fresh migrated database in a temp directory. Keep the `TempDir` alive for
/// the duration of the test or the database file disappears.
pub fn setup_db() -> (TempDir, Arc<DbPool>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("app.db").to_string_lossy().to_string();

    let db_path = db::init(&db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    (dir, pool)
}

pub fn seed_donor(pool: &Arc<DbPool>) -> String {
    let donor = DonorRepository::new(pool.clone())
        .insert(NewDonor {
            id: None,
            name: "Test Donor".to_string(),
            email: Some("donor@example.org".to_string()),
            phone: None,
            organization: None,
            verified: true,
        })
        .expect("Failed to insert donor");
    donor.id
}

pub fn seed_purpose(pool: &Arc<DbPool>) -> String {
    let purpose = PurposeRepository::new(pool.clone())
        .insert(NewDonationPurpose {
            id: None,
            name: "School Fees".to_string(),
            description: None,
        })
        .expect("Failed to insert purpose");
    purpose.id
}

pub fn seed_student(pool: &Arc<DbPool>, full_name: &str) -> Student {
    let new_student = NewStudent {
        full_name: full_name.to_string(),
        status: "ACTIVE".to_string(),
        ..Default::default()
    };
    StudentRepository::new(pool.clone())
        .insert(new_student)
        .expect("Failed to insert student")
}

pub fn confirmed_donation(
    pool: &Arc<DbPool>,
    donor_id: &str,
    purpose_id: &str,
    amount: f64,
) -> Donation {
    DonationRepository::new(pool.clone())
        .insert(NewDonation {
            id: None,
            donor_id: donor_id.to_string(),
            student_id: None,
            purpose_id: purpose_id.to_string(),
            amount,
            remaining_amount: Some(amount),
            currency: Some("SYP".to_string()),
            status: Some("CONFIRMED".to_string()),
            payment_method: None,
            transaction_reference: None,
        })
        .expect("Failed to insert donation")
}

/// Pushes a donation's creation time into the past so FIFO ordering between
/// donations created in the same second is deterministic.
pub fn backdate_donation(pool: &Arc<DbPool>, donation_id: &str, seconds: i64) {
    let mut conn = pool.get().expect("Failed to get connection");
    let backdated = Utc::now().naive_utc() - Duration::seconds(seconds);
    diesel::update(donations::table.find(donation_id))
        .set(donations::created_at.eq(backdated))
        .execute(&mut conn)
        .expect("Failed to backdate donation");
}
