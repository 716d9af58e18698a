use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    constants::{COMPANY_FLOOR_PERCENT, FULL_ALLOCATION_PERCENT},
    errors::Result,
    events::{
        emit, AllocationRecomputed, OverageDetected, ParticipantAdded, ParticipantRemoved,
        ShareUpdated,
    },
    percent::normalize,
    reconciler::{self, Reconciliation},
    roster::Roster,
};

/// Field role of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pilot,
    Helper,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Pilot, Role::Helper];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Pilot => f.write_str("pilot"),
            Role::Helper => f.write_str("helper"),
        }
    }
}

/// Named participant with an individually assigned share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub role: Role,
    /// Percentage of the total amount, in [0, 100]
    pub share_percent: f64,
}

/// Portion of the allocation above 100%
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overage {
    pub percent: f64,
    pub amount: u64,
}

/// One display line of a distribution breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLine {
    pub label: String,
    pub role: Option<Role>,
    pub percent: f64,
    pub amount: u64,
}

/// Live working state of one operation's revenue split
///
/// Inputs are the total, the exact expense and the roster; the company,
/// expense and aggregate shares are derived. Every mutator recomputes all
/// three derived fields before returning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationState {
    total_amount: u64,
    exact_expense: u64,
    roster: Roster,
    company_floor_percent: f64,
    company_share_percent: f64,
    expense_share_percent: f64,
    aggregate_total_percent: f64,
}

impl Default for AllocationState {
    fn default() -> Self {
        Self::new(COMPANY_FLOOR_PERCENT)
    }
}

impl AllocationState {
    pub fn new(company_floor_percent: f64) -> Self {
        Self::with_roster(0, 0, Roster::new(), company_floor_percent)
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_roster(
            0,
            0,
            Roster::with_defaults(config.share_defaults()),
            config.company_floor_percent,
        )
    }

    pub fn with_roster(
        total_amount: u64,
        exact_expense: u64,
        roster: Roster,
        company_floor_percent: f64,
    ) -> Self {
        let mut state = Self {
            total_amount,
            exact_expense,
            roster,
            company_floor_percent,
            company_share_percent: company_floor_percent,
            expense_share_percent: 0.0,
            aggregate_total_percent: 0.0,
        };
        state.recompute();
        state
    }

    /// Rebuilds a stored allocation, keeping the persisted company share
    ///
    /// The stored share is raised to the floor if needed. Expense and
    /// aggregate are derived from it; the next edit recomputes everything.
    pub(crate) fn restore(
        total_amount: u64,
        exact_expense: u64,
        roster: Roster,
        company_floor_percent: f64,
        stored_company_percent: Option<f64>,
    ) -> Self {
        let Some(stored) = stored_company_percent.filter(|v| v.is_finite()) else {
            return Self::with_roster(total_amount, exact_expense, roster, company_floor_percent);
        };

        let company_share_percent = stored.max(company_floor_percent);
        let expense_share_percent = reconciler::expense_share_percent(total_amount, exact_expense);
        let aggregate_total_percent =
            roster.total_share() + company_share_percent + expense_share_percent;

        Self {
            total_amount,
            exact_expense,
            roster,
            company_floor_percent,
            company_share_percent,
            expense_share_percent,
            aggregate_total_percent,
        }
    }

    pub fn set_total_amount(&mut self, total_amount: u64) {
        self.total_amount = total_amount;
        self.recompute();
    }

    pub fn set_exact_expense(&mut self, exact_expense: u64) {
        self.exact_expense = exact_expense;
        self.recompute();
    }

    pub fn add_participant(&mut self, name: &str, role: Role) -> Result<()> {
        let share_percent = self.roster.add(name, role)?.share_percent;

        emit(&ParticipantAdded {
            name: name.trim().to_string(),
            role,
            share_percent,
        });

        self.recompute();
        Ok(())
    }

    /// Removes a participant; returns false when it was not on the roster
    pub fn remove_participant(&mut self, name: &str, role: Role) -> bool {
        let removed = self.roster.remove(name, role);

        if let Some(participant) = &removed {
            emit(&ParticipantRemoved {
                name: participant.name.clone(),
                role,
            });
        }

        self.recompute();
        removed.is_some()
    }

    /// Normalizes and stores a participant's share; false when not found
    pub fn set_share(&mut self, name: &str, role: Role, raw_percent: &str) -> bool {
        self.set_share_percent(name, role, normalize(raw_percent))
    }

    pub fn set_share_percent(&mut self, name: &str, role: Role, percent: f64) -> bool {
        let updated = self.roster.set_share_percent(name, role, percent);

        if let Some(share_percent) = updated {
            emit(&ShareUpdated {
                name: name.trim().to_string(),
                role,
                share_percent,
            });
        }

        self.recompute();
        updated.is_some()
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn exact_expense(&self) -> u64 {
        self.exact_expense
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn company_floor_percent(&self) -> f64 {
        self.company_floor_percent
    }

    pub fn company_share_percent(&self) -> f64 {
        self.company_share_percent
    }

    pub fn expense_share_percent(&self) -> f64 {
        self.expense_share_percent
    }

    pub fn aggregate_total_percent(&self) -> f64 {
        self.aggregate_total_percent
    }

    pub fn reconciliation(&self) -> Reconciliation {
        Reconciliation {
            company_share_percent: self.company_share_percent,
            expense_share_percent: self.expense_share_percent,
            aggregate_total_percent: self.aggregate_total_percent,
        }
    }

    pub fn amount_for(&self, percent: f64) -> u64 {
        reconciler::amount_for(percent, self.total_amount)
    }

    pub fn company_amount(&self) -> u64 {
        self.amount_for(self.company_share_percent)
    }

    pub fn participant_amount(&self, name: &str, role: Role) -> Option<u64> {
        self.roster
            .get(name, role)
            .map(|p| self.amount_for(p.share_percent))
    }

    pub fn overage_amount(&self) -> u64 {
        reconciler::overage_amount(self.aggregate_total_percent, self.total_amount)
    }

    pub fn is_over_allocated(&self) -> bool {
        reconciler::exceeds_full_allocation(self.aggregate_total_percent)
    }

    pub fn is_fully_allocated(&self) -> bool {
        reconciler::is_fully_allocated(self.aggregate_total_percent)
    }

    pub fn overage(&self) -> Option<Overage> {
        self.is_over_allocated().then(|| Overage {
            percent: self.aggregate_total_percent - FULL_ALLOCATION_PERCENT,
            amount: self.overage_amount(),
        })
    }

    /// Company, participants (roster order), then expenses
    pub fn breakdown(&self) -> Vec<ShareLine> {
        let mut lines = Vec::with_capacity(self.roster.len() + 2);

        lines.push(ShareLine {
            label: "Empresa".to_string(),
            role: None,
            percent: self.company_share_percent,
            amount: self.company_amount(),
        });

        for participant in self.roster.iter() {
            lines.push(ShareLine {
                label: participant.name.clone(),
                role: Some(participant.role),
                percent: participant.share_percent,
                amount: self.amount_for(participant.share_percent),
            });
        }

        // Expenses are shown at their exact amount, not the rounded share
        lines.push(ShareLine {
            label: "Gastos".to_string(),
            role: None,
            percent: self.expense_share_percent,
            amount: self.exact_expense,
        });

        lines
    }

    fn recompute(&mut self) {
        let was_over = self.is_over_allocated();

        let result = reconciler::reconcile(
            self.total_amount,
            self.exact_expense,
            &self.roster,
            self.company_floor_percent,
        );
        self.company_share_percent = result.company_share_percent;
        self.expense_share_percent = result.expense_share_percent;
        self.aggregate_total_percent = result.aggregate_total_percent;

        emit(&AllocationRecomputed {
            total_amount: self.total_amount,
            exact_expense: self.exact_expense,
            participant_count: self.roster.len(),
            company_share_percent: result.company_share_percent,
            expense_share_percent: result.expense_share_percent,
            aggregate_total_percent: result.aggregate_total_percent,
        });

        // Report only the transition into overage, not every keystroke inside it
        if result.is_over_allocated() && !was_over {
            emit(&OverageDetected {
                aggregate_total_percent: result.aggregate_total_percent,
                overage_amount: self.overage_amount(),
            });
        }
    }
}
