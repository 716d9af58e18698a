//! Company share reconciliation.
//!
//! Pure functions over `(total_amount, exact_expense, roster, floor)`. Nothing
//! here holds state; `AllocationState` calls `reconcile` after every edit.

use serde::Serialize;

use crate::{
    constants::{FULL_ALLOCATION_PERCENT, PERCENT_EPSILON},
    roster::Roster,
};

/// Derived fields of an allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reconciliation {
    pub company_share_percent: f64,
    pub expense_share_percent: f64,
    pub aggregate_total_percent: f64,
}

impl Reconciliation {
    pub fn is_over_allocated(&self) -> bool {
        exceeds_full_allocation(self.aggregate_total_percent)
    }
}

/// Derives company, expense and aggregate shares
///
/// The company share never drops below `company_floor_percent`, even when
/// participants and expenses already consume the rest of the budget; the
/// aggregate then exceeds 100 and is reported as-is.
pub fn reconcile(
    total_amount: u64,
    exact_expense: u64,
    roster: &Roster,
    company_floor_percent: f64,
) -> Reconciliation {
    let participant_total = roster.total_share();
    let expense_share_percent = expense_share_percent(total_amount, exact_expense);

    let remainder = FULL_ALLOCATION_PERCENT - participant_total - expense_share_percent;
    let company_share_percent = company_floor_percent.max(remainder);

    Reconciliation {
        company_share_percent,
        expense_share_percent,
        aggregate_total_percent: participant_total + company_share_percent + expense_share_percent,
    }
}

/// Share of the total consumed by the exact expense; 0 when there is no total
pub fn expense_share_percent(total_amount: u64, exact_expense: u64) -> f64 {
    if total_amount == 0 {
        return 0.0;
    }
    // Multiply first so whole-percent expenses stay exact
    (exact_expense as f64 * 100.0) / total_amount as f64
}

/// Currency amount for a share of the total, rounded half-up to a whole unit
pub fn amount_for(percent: f64, total_amount: u64) -> u64 {
    let raw = percent * total_amount as f64 / 100.0;
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    // f64 -> u64 casts saturate
    (raw + 0.5).floor() as u64
}

/// Amount by which the allocation exceeds the total; 0 when balanced or under
pub fn overage_amount(aggregate_total_percent: f64, total_amount: u64) -> u64 {
    if !exceeds_full_allocation(aggregate_total_percent) {
        return 0;
    }
    amount_for(aggregate_total_percent - FULL_ALLOCATION_PERCENT, total_amount)
}

pub fn exceeds_full_allocation(aggregate_total_percent: f64) -> bool {
    aggregate_total_percent - FULL_ALLOCATION_PERCENT > PERCENT_EPSILON
}

pub fn is_fully_allocated(aggregate_total_percent: f64) -> bool {
    (aggregate_total_percent - FULL_ALLOCATION_PERCENT).abs() <= PERCENT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{roster::ShareDefaults, state::Role};

    fn roster(pilot: f64, helper: f64) -> Roster {
        let mut roster = Roster::with_defaults(ShareDefaults { pilot, helper });
        roster.add("Juan Pérez", Role::Pilot).unwrap();
        roster.add("Carlos Rodríguez", Role::Helper).unwrap();
        roster
    }

    #[test]
    fn balanced_case() {
        let r = reconcile(450_000, 0, &roster(40.0, 14.0), 36.0);
        assert_eq!(r.company_share_percent, 46.0);
        assert_eq!(r.expense_share_percent, 0.0);
        assert_eq!(r.aggregate_total_percent, 100.0);
        assert!(!r.is_over_allocated());
        assert_eq!(overage_amount(r.aggregate_total_percent, 450_000), 0);
    }

    #[test]
    fn floor_triggers_overage() {
        let r = reconcile(1_000_000, 0, &roster(50.0, 20.0), 36.0);
        assert_eq!(r.company_share_percent, 36.0);
        assert_eq!(r.aggregate_total_percent, 106.0);
        assert!(r.is_over_allocated());
        assert_eq!(overage_amount(r.aggregate_total_percent, 1_000_000), 60_000);
    }

    #[test]
    fn expense_interaction() {
        let r = reconcile(500_000, 50_000, &roster(40.0, 14.0), 36.0);
        assert_eq!(r.expense_share_percent, 10.0);
        assert_eq!(r.company_share_percent, 36.0);
        assert_eq!(r.aggregate_total_percent, 100.0);
    }

    #[test]
    fn zero_total_has_no_expense_share() {
        assert_eq!(expense_share_percent(0, 50_000), 0.0);
        let r = reconcile(0, 50_000, &Roster::new(), 36.0);
        assert_eq!(r.company_share_percent, 100.0);
        assert_eq!(r.aggregate_total_percent, 100.0);
    }

    #[test]
    fn expense_larger_than_total() {
        let r = reconcile(100_000, 150_000, &Roster::new(), 36.0);
        assert_eq!(r.expense_share_percent, 150.0);
        assert_eq!(r.company_share_percent, 36.0);
        assert_eq!(r.aggregate_total_percent, 186.0);
    }

    #[test]
    fn amount_for_rounds_half_up() {
        assert_eq!(amount_for(46.0, 450_000), 207_000);
        assert_eq!(amount_for(50.0, 1), 1);
        assert_eq!(amount_for(49.0, 1), 0);
        assert_eq!(amount_for(33.0, 10), 3);
        assert_eq!(amount_for(35.0, 10), 4);
    }

    #[test]
    fn amount_for_degenerate_inputs() {
        assert_eq!(amount_for(0.0, 1_000_000), 0);
        assert_eq!(amount_for(50.0, 0), 0);
        assert_eq!(amount_for(-10.0, 1_000), 0);
        assert_eq!(amount_for(f64::NAN, 1_000), 0);
    }

    #[test]
    fn fully_allocated_tolerates_float_noise() {
        assert!(is_fully_allocated(100.0));
        assert!(is_fully_allocated(100.0 + 1e-12));
        assert!(!is_fully_allocated(99.5));
        assert!(!exceeds_full_allocation(100.0 + 1e-12));
    }
}
