use std::sync::Arc;

use chrono::Utc;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use crate::db::{get_connection, DbPool};
use crate::donations::{Donation, DonationStatus};
use crate::errors::{Error, Result};
use crate::expenses::allocation::{plan_allocations, AllocationPlan, PlannedAllocation};
use crate::expenses::expenses_model::{
    DonationExpenseAllocation, Expense, ExpenseOutcome, ExpenseWithAllocations, FinancialReport,
    NewAllocation, NewExpense,
};
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::schema::{donation_expense_allocations, donation_purposes, donations, expenses};

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ExpenseRepository { pool }
    }

    /// Donations the engine may draw from, oldest pledge first.
    fn eligible_donations(conn: &mut SqliteConnection) -> Result<Vec<Donation>> {
        Ok(donations::table
            .filter(donations::status.eq(DonationStatus::Confirmed.as_str()))
            .filter(donations::remaining_amount.gt(0.0))
            .order(donations::created_at.asc())
            .load::<Donation>(conn)?)
    }

    fn insert_allocation_row(
        conn: &mut SqliteConnection,
        donation_id: &str,
        expense_id: &str,
        amount: f64,
    ) -> Result<DonationExpenseAllocation> {
        Ok(diesel::insert_into(donation_expense_allocations::table)
            .values((
                donation_expense_allocations::id.eq(uuid::Uuid::new_v4().to_string()),
                donation_expense_allocations::donation_id.eq(donation_id),
                donation_expense_allocations::expense_id.eq(expense_id),
                donation_expense_allocations::amount.eq(amount),
            ))
            .returning(donation_expense_allocations::all_columns)
            .get_result(conn)?)
    }

    /// Compare-and-decrement on the donation balance. The `remaining_amount >=
    /// consumed` guard keeps concurrent allocations from over-drawing a
    /// donation even under weak isolation; zero affected rows aborts the
    /// surrounding transaction.
    fn consume_donation_balance(
        conn: &mut SqliteConnection,
        donation_id: &str,
        consumed: f64,
    ) -> Result<()> {
        let updated = diesel::update(
            donations::table
                .find(donation_id)
                .filter(donations::remaining_amount.ge(consumed)),
        )
        .set((
            donations::remaining_amount.eq(donations::remaining_amount - consumed),
            donations::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(Error::Conflict(format!(
                "Donation {} no longer has {} available",
                donation_id, consumed
            )));
        }

        let remaining: f64 = donations::table
            .find(donation_id)
            .select(donations::remaining_amount)
            .first(conn)?;
        if remaining <= 0.0 {
            diesel::update(donations::table.find(donation_id))
                .set(donations::status.eq(DonationStatus::Used.as_str()))
                .execute(conn)?;
        }

        Ok(())
    }

    fn restore_donation_balance(
        conn: &mut SqliteConnection,
        donation_id: &str,
        restored: f64,
    ) -> Result<()> {
        diesel::update(donations::table.find(donation_id))
            .set((
                donations::remaining_amount.eq(donations::remaining_amount + restored),
                donations::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        // A drained donation gets its eligibility back along with its balance.
        let status: String = donations::table
            .find(donation_id)
            .select(donations::status)
            .first(conn)?;
        if status == DonationStatus::Used.as_str() {
            diesel::update(donations::table.find(donation_id))
                .set(donations::status.eq(DonationStatus::Confirmed.as_str()))
                .execute(conn)?;
        }

        Ok(())
    }
}

impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list(&self) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .order(expenses::created_at.desc())
            .load::<Expense>(&mut conn)?)
    }

    fn list_by_student(&self, student_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::student_id.eq(student_id))
            .order(expenses::created_at.desc())
            .load::<Expense>(&mut conn)?)
    }

    fn get_by_id(&self, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        expenses::table
            .find(expense_id)
            .first::<Expense>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Expense {}", expense_id)))
    }

    fn allocations_for_expense(&self, expense_id: &str) -> Result<Vec<DonationExpenseAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donation_expense_allocations::table
            .filter(donation_expense_allocations::expense_id.eq(expense_id))
            .order(donation_expense_allocations::created_at.asc())
            .load::<DonationExpenseAllocation>(&mut conn)?)
    }

    fn allocations_for_donation(
        &self,
        donation_id: &str,
    ) -> Result<Vec<DonationExpenseAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donation_expense_allocations::table
            .filter(donation_expense_allocations::donation_id.eq(donation_id))
            .order(donation_expense_allocations::created_at.asc())
            .load::<DonationExpenseAllocation>(&mut conn)?)
    }

    fn purpose_exists(&self, purpose_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let found: Option<String> = donation_purposes::table
            .find(purpose_id)
            .select(donation_purposes::id)
            .first(&mut conn)
            .optional()?;
        Ok(found.is_some())
    }

    fn get_donation(&self, donation_id: &str) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        donations::table
            .find(donation_id)
            .first::<Donation>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Donation {}", donation_id)))
    }

    fn create_covered_expense(&self, mut new_expense: NewExpense) -> Result<ExpenseOutcome> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction::<ExpenseOutcome, Error, _>(|conn| {
            let eligible = Self::eligible_donations(conn)?;

            let planned: Vec<PlannedAllocation> =
                match plan_allocations(&eligible, new_expense.amount) {
                    AllocationPlan::Covered(planned) => planned,
                    AllocationPlan::Shortfall { missing } => {
                        debug!(
                            "Rejecting expense of {}: short by {}",
                            new_expense.amount, missing
                        );
                        return Ok(ExpenseOutcome::Rejected {
                            reason: "Not enough donations balance to cover this expense"
                                .to_string(),
                        });
                    }
                };

            new_expense.id = Some(uuid::Uuid::new_v4().to_string());
            let expense: Expense = diesel::insert_into(expenses::table)
                .values(&new_expense)
                .returning(expenses::all_columns)
                .get_result(conn)?;

            let mut allocations = Vec::with_capacity(planned.len());
            for p in &planned {
                allocations.push(Self::insert_allocation_row(
                    conn,
                    &p.donation_id,
                    &expense.id,
                    p.amount,
                )?);
                Self::consume_donation_balance(conn, &p.donation_id, p.amount)?;
            }

            Ok(ExpenseOutcome::Funded(ExpenseWithAllocations {
                expense,
                allocations,
            }))
        })
    }

    fn insert_manual_allocation(
        &self,
        new_allocation: NewAllocation,
    ) -> Result<DonationExpenseAllocation> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction::<DonationExpenseAllocation, Error, _>(|conn| {
            let donation: Donation = donations::table
                .find(&new_allocation.donation_id)
                .first(conn)
                .optional()?
                .ok_or_else(|| {
                    Error::NotFound(format!("Donation {}", new_allocation.donation_id))
                })?;

            if donation.status != DonationStatus::Confirmed.as_str() {
                return Err(Error::Conflict(
                    "Only confirmed donations can be allocated".to_string(),
                ));
            }

            let expense: Expense = expenses::table
                .find(&new_allocation.expense_id)
                .first(conn)
                .optional()?
                .ok_or_else(|| Error::NotFound(format!("Expense {}", new_allocation.expense_id)))?;

            if new_allocation.amount > donation.remaining_amount {
                return Err(Error::Validation(
                    crate::errors::ValidationError::InvalidInput(format!(
                        "Allocation amount ({}) exceeds donation remaining amount ({})",
                        new_allocation.amount, donation.remaining_amount
                    )),
                ));
            }

            let expense_allocated: Option<f64> = donation_expense_allocations::table
                .filter(donation_expense_allocations::expense_id.eq(&expense.id))
                .select(sum(donation_expense_allocations::amount))
                .first(conn)?;
            let expense_remaining = expense.amount - expense_allocated.unwrap_or(0.0);
            if new_allocation.amount > expense_remaining {
                return Err(Error::Validation(
                    crate::errors::ValidationError::InvalidInput(format!(
                        "Allocation amount ({}) exceeds expense remaining amount ({})",
                        new_allocation.amount, expense_remaining
                    )),
                ));
            }

            let duplicate: Option<String> = donation_expense_allocations::table
                .filter(donation_expense_allocations::donation_id.eq(&donation.id))
                .filter(donation_expense_allocations::expense_id.eq(&expense.id))
                .select(donation_expense_allocations::id)
                .first(conn)
                .optional()?;
            if duplicate.is_some() {
                return Err(Error::Conflict(
                    "Allocation already exists for this donation and expense".to_string(),
                ));
            }

            let allocation = Self::insert_allocation_row(
                conn,
                &donation.id,
                &expense.id,
                new_allocation.amount,
            )?;
            Self::consume_donation_balance(conn, &donation.id, new_allocation.amount)?;

            Ok(allocation)
        })
    }

    fn delete_allocation_restoring_balance(&self, allocation_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction::<(), Error, _>(|conn| {
            let allocation: DonationExpenseAllocation = donation_expense_allocations::table
                .find(allocation_id)
                .first(conn)
                .optional()?
                .ok_or_else(|| Error::NotFound(format!("Allocation {}", allocation_id)))?;

            diesel::delete(donation_expense_allocations::table.find(allocation_id))
                .execute(conn)?;
            Self::restore_donation_balance(conn, &allocation.donation_id, allocation.amount)?;

            Ok(())
        })
    }

    fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(expenses::table.find(expense_id)).execute(&mut conn)?)
    }

    fn financial_report(&self) -> Result<FinancialReport> {
        let mut conn = get_connection(&self.pool)?;

        let total_donations: Option<f64> = donations::table
            .filter(donations::status.ne(DonationStatus::Pending.as_str()))
            .select(sum(donations::amount))
            .first(&mut conn)?;
        let total_expenses: Option<f64> = expenses::table
            .select(sum(expenses::amount))
            .first(&mut conn)?;
        let total_allocated: Option<f64> = donation_expense_allocations::table
            .select(sum(donation_expense_allocations::amount))
            .first(&mut conn)?;

        let total_donations = total_donations.unwrap_or(0.0);
        let total_allocated = total_allocated.unwrap_or(0.0);
        let utilization_rate = if total_donations > 0.0 {
            total_allocated / total_donations * 100.0
        } else {
            0.0
        };

        Ok(FinancialReport {
            total_donations,
            total_expenses: total_expenses.unwrap_or(0.0),
            total_allocated,
            remaining_balance: total_donations - total_allocated,
            utilization_rate,
        })
    }
}
