use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{Error, Result, ValidationError};
use crate::expenses::expenses_model::{
    AllocationSummary, DonationExpenseAllocation, ExpenseCoverage, ExpenseOutcome,
    ExpenseTargetType, ExpenseWithAllocations, FinancialReport, NewAllocation, NewExpense,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::notifications::{NewNotification, NotificationServiceTrait, KIND_USER_ALERT};

pub struct ExpenseService<T: ExpenseRepositoryTrait> {
    repo: Arc<T>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl<T: ExpenseRepositoryTrait> ExpenseService<T> {
    pub fn new(repo: Arc<T>, notifications: Arc<dyn NotificationServiceTrait>) -> Self {
        ExpenseService {
            repo,
            notifications,
        }
    }

    /// The target type dictates which target-id field is mandatory. Checked
    /// before any donation is touched.
    fn validate_target(new_expense: &NewExpense) -> Result<()> {
        match ExpenseTargetType::from_str(&new_expense.target_type)? {
            ExpenseTargetType::Student if new_expense.student_id.is_none() => {
                Err(ValidationError::MissingField("studentId".into()).into())
            }
            ExpenseTargetType::School if new_expense.school_id.is_none() => {
                Err(ValidationError::MissingField("schoolId".into()).into())
            }
            ExpenseTargetType::Vendor if new_expense.vendor_id.is_none() => {
                Err(ValidationError::MissingField("vendorId".into()).into())
            }
            _ => Ok(()),
        }
    }

    fn with_allocations(
        &self,
        expense: crate::expenses::expenses_model::Expense,
    ) -> Result<ExpenseWithAllocations> {
        let allocations = self.repo.allocations_for_expense(&expense.id)?;
        Ok(ExpenseWithAllocations {
            expense,
            allocations,
        })
    }

    fn covered_amount(allocations: &[DonationExpenseAllocation]) -> f64 {
        allocations.iter().map(|a| a.amount).sum()
    }
}

#[async_trait]
impl<T: ExpenseRepositoryTrait> ExpenseServiceTrait for ExpenseService<T> {
    fn get_expenses(&self) -> Result<Vec<ExpenseWithAllocations>> {
        self.repo
            .list()?
            .into_iter()
            .map(|e| self.with_allocations(e))
            .collect()
    }

    fn get_expenses_by_student(&self, student_id: &str) -> Result<Vec<ExpenseWithAllocations>> {
        self.repo
            .list_by_student(student_id)?
            .into_iter()
            .map(|e| self.with_allocations(e))
            .collect()
    }

    fn get_expense(&self, expense_id: &str) -> Result<ExpenseWithAllocations> {
        let expense = self.repo.get_by_id(expense_id)?;
        self.with_allocations(expense)
    }

    fn get_expense_coverage(&self, expense_id: &str) -> Result<ExpenseCoverage> {
        let expense = self.repo.get_by_id(expense_id)?;
        let allocations = self.repo.allocations_for_expense(expense_id)?;
        let covered_amount = Self::covered_amount(&allocations);

        Ok(ExpenseCoverage {
            expense_id: expense.id,
            expense_amount: expense.amount,
            covered_amount,
            remaining_amount: expense.amount - covered_amount,
            percentage_covered: covered_amount / expense.amount * 100.0,
            allocations,
        })
    }

    fn get_donation_allocations(&self, donation_id: &str) -> Result<AllocationSummary> {
        let donation = self.repo.get_donation(donation_id)?;
        let allocations = self.repo.allocations_for_donation(donation_id)?;
        let allocated_amount = Self::covered_amount(&allocations);

        Ok(AllocationSummary {
            donation_id: donation.id,
            donation_amount: donation.amount,
            allocated_amount,
            remaining_amount: donation.amount - allocated_amount,
            allocations,
        })
    }

    fn get_financial_report(&self) -> Result<FinancialReport> {
        self.repo.financial_report()
    }

    async fn create_expense(&self, mut new_expense: NewExpense) -> Result<ExpenseOutcome> {
        if new_expense.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(new_expense.amount).into());
        }
        Self::validate_target(&new_expense)?;
        if !self.repo.purpose_exists(&new_expense.purpose_id)? {
            return Err(Error::NotFound(format!(
                "Donation purpose {}",
                new_expense.purpose_id
            )));
        }

        new_expense
            .currency
            .get_or_insert_with(|| DEFAULT_CURRENCY.to_string());

        let outcome = self.repo.create_covered_expense(new_expense)?;

        if let ExpenseOutcome::Funded(ref funded) = outcome {
            info!(
                "Expense {} funded by {} donation(s)",
                funded.expense.id,
                funded.allocations.len()
            );
            let result = self.notifications.create(NewNotification {
                id: None,
                recipient_ref: funded.expense.created_by_id.clone(),
                title: "Expense Funded".to_string(),
                message: format!(
                    "Expense of {} {} was fully covered by {} donation(s).",
                    funded.expense.amount,
                    funded.expense.currency,
                    funded.allocations.len()
                ),
                kind: KIND_USER_ALERT.to_string(),
            });
            if let Err(e) = result {
                warn!("Failed to send allocation notification: {}", e);
            }
        }

        Ok(outcome)
    }

    async fn allocate_to_expense(
        &self,
        new_allocation: NewAllocation,
    ) -> Result<DonationExpenseAllocation> {
        if new_allocation.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(new_allocation.amount).into());
        }
        self.repo.insert_manual_allocation(new_allocation)
    }

    async fn remove_allocation(&self, allocation_id: &str) -> Result<()> {
        self.repo.delete_allocation_restoring_balance(allocation_id)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<()> {
        self.repo.get_by_id(expense_id)?;
        let allocations = self.repo.allocations_for_expense(expense_id)?;
        if !allocations.is_empty() {
            return Err(Error::Conflict(format!(
                "Expense {} still has allocations; remove them first",
                expense_id
            )));
        }
        self.repo.delete_expense(expense_id)?;
        Ok(())
    }
}
