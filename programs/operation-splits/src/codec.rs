//! Mapping between `AllocationState` and the persisted record fields.
//!
//! `decode` reads both the four-bucket and the roster shape of
//! `distribucionPago`; `encode` always writes the roster shape.

use std::collections::BTreeMap;

use crate::{
    config::EngineConfig,
    errors::{require, AllocationError, Result},
    legacy::LegacyDistribution,
    reconciler::amount_for,
    record::{CurrentDistribution, DistributionSnapshot, OperationRecord},
    roster::Roster,
    state::{AllocationState, Role},
};

/// Why a record is being decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeIntent {
    /// Loading into an editor: a record with no personnel or distribution is malformed
    Edit,
    /// Read-only display: missing personnel decodes as an empty roster
    View,
}

/// Builds the working allocation for a stored record
///
/// # Errors
///
/// `MalformedRecord` when decoding for `Edit` and the record has neither
/// personnel nor a stored distribution.
pub fn decode(
    record: &OperationRecord,
    intent: DecodeIntent,
    config: &EngineConfig,
) -> Result<AllocationState> {
    if intent == DecodeIntent::Edit {
        require!(
            record.has_personnel() || record.distribution.is_some(),
            AllocationError::MalformedRecord(format!(
                "operation {} has no personnel or distribution fields",
                record.id.as_deref().unwrap_or("<new>")
            ))
        );
    }

    let total_amount = record.total_amount.unwrap_or(0);
    let mut roster = Roster::with_defaults(config.share_defaults());

    let (exact_expense, stored_company) = match &record.distribution {
        Some(DistributionSnapshot::Current(current)) => {
            fill_from_shares(&mut roster, record, current);
            (record.exact_expense.unwrap_or(0), current.empresa)
        }
        Some(DistributionSnapshot::Legacy(legacy)) => {
            fill_from_legacy(&mut roster, record, Some(legacy));
            // Four-bucket records only stored the expense as a percentage
            let expense = record
                .exact_expense
                .unwrap_or_else(|| amount_for(f64::from(legacy.gastos), total_amount));
            (expense, Some(f64::from(legacy.empresa)))
        }
        None => {
            fill_from_legacy(&mut roster, record, None);
            (record.exact_expense.unwrap_or(0), None)
        }
    };

    Ok(AllocationState::restore(
        total_amount,
        exact_expense,
        roster,
        config.company_floor_percent,
        stored_company,
    ))
}

/// Listed names keep their list order; map-only names follow in key order
fn fill_from_shares(roster: &mut Roster, record: &OperationRecord, current: &CurrentDistribution) {
    for role in Role::ALL {
        let shares = current.shares(role);

        for name in record.names(role) {
            let share = shares
                .get(&name)
                .copied()
                .unwrap_or_else(|| roster.defaults().for_role(role));
            insert_skipping_duplicates(roster, &name, role, share);
        }

        for (name, share) in shares {
            if !roster.contains(name, role) {
                insert_skipping_duplicates(roster, name, role, *share);
            }
        }
    }
}

fn fill_from_legacy(
    roster: &mut Roster,
    record: &OperationRecord,
    legacy: Option<&LegacyDistribution>,
) {
    for role in Role::ALL {
        let share = match (legacy, role) {
            (Some(l), Role::Pilot) => f64::from(l.piloto),
            (Some(l), Role::Helper) => f64::from(l.ayudante),
            (None, _) => roster.defaults().for_role(role),
        };

        for name in record.names(role) {
            insert_skipping_duplicates(roster, &name, role, share);
        }
    }
}

fn insert_skipping_duplicates(roster: &mut Roster, name: &str, role: Role, share: f64) {
    match roster.insert(name, role, share) {
        Ok(_participant) => {
            #[cfg(feature = "verbose")]
            tracing::debug!(
                name = %_participant.name,
                %role,
                share_percent = _participant.share_percent,
                "decoded participant"
            );
        }
        Err(err) => {
            tracing::warn!(name, %role, error = %err, "skipping stored participant");
        }
    }
}

/// Persisted form of an allocation: the roster-shaped snapshot plus amounts
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDistribution {
    pub distribution: CurrentDistribution,
    pub pilots: Vec<String>,
    pub helpers: Vec<String>,
    pub total_amount: u64,
    pub exact_expense: u64,
}

/// Snapshot of the state in the current (roster) shape
pub fn encode(state: &AllocationState) -> EncodedDistribution {
    let roster = state.roster();
    let shares = |role: Role| -> BTreeMap<String, f64> {
        roster
            .by_role(role)
            .map(|p| (p.name.clone(), p.share_percent))
            .collect()
    };

    EncodedDistribution {
        distribution: CurrentDistribution {
            empresa: Some(state.company_share_percent()),
            pilots: shares(Role::Pilot),
            helpers: shares(Role::Helper),
        },
        pilots: roster.names(Role::Pilot),
        helpers: roster.names(Role::Helper),
        total_amount: state.total_amount(),
        exact_expense: state.exact_expense(),
    }
}

impl EncodedDistribution {
    /// Writes the snapshot onto a record, replacing any legacy personnel fields
    pub fn apply_to(self, record: &mut OperationRecord) {
        record.distribution = Some(DistributionSnapshot::Current(self.distribution));
        record.pilots = Some(self.pilots);
        record.helpers = Some(self.helpers);
        record.legacy_pilot = None;
        record.legacy_helper = None;
        record.total_amount = Some(self.total_amount);
        record.exact_expense = Some(self.exact_expense);
    }
}
