use crate::errors::Result;
use crate::expenses::expenses_model::{
    AllocationSummary, DonationExpenseAllocation, Expense, ExpenseCoverage, ExpenseOutcome,
    ExpenseWithAllocations, FinancialReport, NewAllocation, NewExpense,
};

/// Trait for expense repository operations
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Expense>>;
    fn list_by_student(&self, student_id: &str) -> Result<Vec<Expense>>;
    fn get_by_id(&self, expense_id: &str) -> Result<Expense>;
    fn allocations_for_expense(&self, expense_id: &str) -> Result<Vec<DonationExpenseAllocation>>;
    fn allocations_for_donation(&self, donation_id: &str)
        -> Result<Vec<DonationExpenseAllocation>>;
    fn purpose_exists(&self, purpose_id: &str) -> Result<bool>;
    fn get_donation(&self, donation_id: &str) -> Result<crate::donations::Donation>;

    /// Runs the full allocation transaction: FIFO planning against the
    /// eligible pool, expense insert, allocation inserts, and guarded
    /// balance decrements. All-or-nothing.
    fn create_covered_expense(&self, new_expense: NewExpense) -> Result<ExpenseOutcome>;

    fn insert_manual_allocation(
        &self,
        new_allocation: NewAllocation,
    ) -> Result<DonationExpenseAllocation>;
    fn delete_allocation_restoring_balance(&self, allocation_id: &str) -> Result<()>;
    fn delete_expense(&self, expense_id: &str) -> Result<usize>;
    fn financial_report(&self) -> Result<FinancialReport>;
}

/// Trait for expense service operations
#[async_trait::async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expenses(&self) -> Result<Vec<ExpenseWithAllocations>>;
    fn get_expenses_by_student(&self, student_id: &str) -> Result<Vec<ExpenseWithAllocations>>;
    fn get_expense(&self, expense_id: &str) -> Result<ExpenseWithAllocations>;
    fn get_expense_coverage(&self, expense_id: &str) -> Result<ExpenseCoverage>;
    fn get_donation_allocations(&self, donation_id: &str) -> Result<AllocationSummary>;
    fn get_financial_report(&self) -> Result<FinancialReport>;
    async fn create_expense(&self, new_expense: NewExpense) -> Result<ExpenseOutcome>;
    async fn allocate_to_expense(
        &self,
        new_allocation: NewAllocation,
    ) -> Result<DonationExpenseAllocation>;
    async fn remove_allocation(&self, allocation_id: &str) -> Result<()>;
    async fn delete_expense(&self, expense_id: &str) -> Result<()>;
}
