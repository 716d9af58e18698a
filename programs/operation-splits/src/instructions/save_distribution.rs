use crate::{
    codec::encode,
    config::DistributionMode,
    errors::{require, AllocationError, Result},
    events::{emit, DistributionSaved},
    record::OperationRecord,
    state::{AllocationState, Overage},
    store::{RecordStore, SessionProvider},
};

use super::Context;

/// Result of a distribution save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub record: OperationRecord,
    pub aggregate_total_percent: f64,
    /// Set when the saved distribution allocates more than 100%
    pub overage: Option<Overage>,
}

/// Persists an allocation onto its operation record
///
/// Strict mode refuses anything but an exact 100% total. Flexible mode
/// always saves and hands the overage back for the caller to display.
pub fn handler<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    id: &str,
    allocation: &AllocationState,
) -> Result<SaveOutcome> {
    let user = ctx.require_user()?;

    let aggregate_total_percent = allocation.aggregate_total_percent();

    if ctx.config.mode == DistributionMode::Strict {
        require!(
            allocation.is_fully_allocated(),
            AllocationError::UnbalancedDistribution {
                total: aggregate_total_percent
            }
        );
    }

    let mut record = ctx.store.fetch_by_id(id)?;
    encode(allocation).apply_to(&mut record);
    ctx.store.save(id, record)?;

    let overage = allocation.overage();
    if let Some(overage) = &overage {
        tracing::warn!(
            id,
            aggregate_total_percent,
            overage_amount = overage.amount,
            "distribution saved with overage"
        );
    }

    let record = ctx.store.fetch_by_id(id)?;

    emit(&DistributionSaved {
        id: id.to_string(),
        user,
        total_amount: allocation.total_amount(),
        exact_expense: allocation.exact_expense(),
        company_share_percent: allocation.company_share_percent(),
        aggregate_total_percent,
        overage_amount: overage.map_or(0, |o| o.amount),
        timestamp: record.updated_at.unwrap_or_default(),
    });

    Ok(SaveOutcome {
        record,
        aggregate_total_percent,
        overage,
    })
}
