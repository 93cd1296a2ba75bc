use serde::{Deserialize, Serialize};

use crate::donations::Donation;

/// One planned draw against a donation's remaining balance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAllocation {
    pub donation_id: String,
    pub amount: f64,
}

/// Outcome of planning coverage for an expense amount.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationPlan {
    Covered(Vec<PlannedAllocation>),
    Shortfall { missing: f64 },
}

/// Plans how an expense amount is drawn from the eligible donation pool.
///
/// Donations must arrive ordered oldest-created-first; each is consumed up to
/// its remaining balance until the expense is covered. All-or-nothing: any
/// uncovered remainder rejects the whole plan, no partial result is returned.
pub fn plan_allocations(donations: &[Donation], expense_amount: f64) -> AllocationPlan {
    let mut allocations = Vec::new();
    let mut remaining = expense_amount;

    for donation in donations {
        if remaining <= 0.0 {
            break;
        }

        let used = donation.remaining_amount.min(remaining);
        if used <= 0.0 {
            continue;
        }

        allocations.push(PlannedAllocation {
            donation_id: donation.id.clone(),
            amount: used,
        });
        remaining -= used;
    }

    if remaining > 0.0 {
        return AllocationPlan::Shortfall { missing: remaining };
    }

    AllocationPlan::Covered(allocations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn donation(id: &str, remaining: f64, created_offset_secs: i64) -> Donation {
        let base = NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap()
            + chrono::Duration::seconds(created_offset_secs);
        Donation {
            id: id.to_string(),
            donor_id: "donor-1".to_string(),
            student_id: None,
            purpose_id: "purpose-1".to_string(),
            amount: remaining,
            remaining_amount: remaining,
            currency: "SYP".to_string(),
            status: "CONFIRMED".to_string(),
            payment_method: None,
            transaction_reference: None,
            created_at: base,
            updated_at: base,
        }
    }

    #[test]
    fn consumes_oldest_donation_first() {
        let pool = vec![donation("a", 100.0, 0), donation("b", 100.0, 60)];
        let plan = plan_allocations(&pool, 150.0);

        assert_eq!(
            plan,
            AllocationPlan::Covered(vec![
                PlannedAllocation {
                    donation_id: "a".to_string(),
                    amount: 100.0
                },
                PlannedAllocation {
                    donation_id: "b".to_string(),
                    amount: 50.0
                },
            ])
        );
    }

    #[test]
    fn exact_cover_from_single_donation() {
        let pool = vec![donation("a", 500.0, 0)];
        let plan = plan_allocations(&pool, 300.0);

        assert_eq!(
            plan,
            AllocationPlan::Covered(vec![PlannedAllocation {
                donation_id: "a".to_string(),
                amount: 300.0
            }])
        );
    }

    #[test]
    fn shortfall_rejects_whole_plan() {
        let pool = vec![donation("a", 100.0, 0), donation("b", 40.0, 60)];
        let plan = plan_allocations(&pool, 200.0);

        assert_eq!(plan, AllocationPlan::Shortfall { missing: 60.0 });
    }

    #[test]
    fn empty_pool_is_a_shortfall() {
        let plan = plan_allocations(&[], 10.0);
        assert_eq!(plan, AllocationPlan::Shortfall { missing: 10.0 });
    }

    #[test]
    fn skips_drained_donations() {
        let mut drained = donation("a", 100.0, 0);
        drained.remaining_amount = 0.0;
        let pool = vec![drained, donation("b", 50.0, 60)];

        let plan = plan_allocations(&pool, 50.0);
        assert_eq!(
            plan,
            AllocationPlan::Covered(vec![PlannedAllocation {
                donation_id: "b".to_string(),
                amount: 50.0
            }])
        );
    }
}
