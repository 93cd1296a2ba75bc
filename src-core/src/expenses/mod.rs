pub mod allocation;
pub mod expenses_model;
pub mod expenses_repository;
pub mod expenses_service;
pub mod expenses_traits;

pub use allocation::{plan_allocations, AllocationPlan, PlannedAllocation};
pub use expenses_model::{
    AllocationSummary, DonationExpenseAllocation, Expense, ExpenseCoverage, ExpenseOutcome,
    ExpenseTargetType, ExpenseWithAllocations, FinancialReport, NewAllocation, NewExpense,
};
pub use expenses_repository::ExpenseRepository;
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
