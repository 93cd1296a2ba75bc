use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Discriminates which target-id field an expense must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseTargetType {
    Student,
    School,
    Vendor,
}

impl ExpenseTargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseTargetType::Student => "STUDENT",
            ExpenseTargetType::School => "SCHOOL",
            ExpenseTargetType::Vendor => "VENDOR",
        }
    }
}

impl std::str::FromStr for ExpenseTargetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(ExpenseTargetType::Student),
            "SCHOOL" => Ok(ExpenseTargetType::School),
            "VENDOR" => Ok(ExpenseTargetType::Vendor),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown expense target type '{}'",
                other
            ))
            .into()),
        }
    }
}

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub student_id: Option<String>,
    pub school_id: Option<String>,
    pub vendor_id: Option<String>,
    pub target_type: String,
    pub purpose_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
    pub created_by_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub student_id: Option<String>,
    pub school_id: Option<String>,
    pub vendor_id: Option<String>,
    pub target_type: String,
    pub purpose_id: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
    pub created_by_id: String,
}

#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::donation_expense_allocations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DonationExpenseAllocation {
    pub id: String,
    pub donation_id: String,
    pub expense_id: String,
    pub amount: f64,
    pub created_at: NaiveDateTime,
}

/// Manual allocation request: an explicitly-partial operation, unlike the
/// all-or-nothing automatic coverage on expense creation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAllocation {
    pub donation_id: String,
    pub expense_id: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseWithAllocations {
    #[serde(flatten)]
    pub expense: Expense,
    pub allocations: Vec<DonationExpenseAllocation>,
}

/// Result of an expense-creation request. Insufficient funding is a business
/// rejection, not an error, so callers can tell it apart from system failures.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExpenseOutcome {
    Funded(ExpenseWithAllocations),
    Rejected { reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCoverage {
    pub expense_id: String,
    pub expense_amount: f64,
    pub covered_amount: f64,
    pub remaining_amount: f64,
    pub percentage_covered: f64,
    pub allocations: Vec<DonationExpenseAllocation>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub donation_id: String,
    pub donation_amount: f64,
    pub allocated_amount: f64,
    pub remaining_amount: f64,
    pub allocations: Vec<DonationExpenseAllocation>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub total_donations: f64,
    pub total_expenses: f64,
    pub total_allocated: f64,
    pub remaining_balance: f64,
    pub utilization_rate: f64,
}
