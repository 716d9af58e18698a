use crate::{
    errors::Result,
    events::{emit, OperationUpdated},
    record::{input_date_to_stored, DistributionSnapshot, OperationRecord},
    state::Role,
    store::{RecordStore, SessionProvider},
};

use super::Context;

/// Replaces an operation's form fields
///
/// The distribution, amounts and creation time are only written by
/// `save_distribution`; when the incoming record leaves them empty the
/// stored values are kept. Stored keys the form does not model are merged
/// back in.
pub fn handler<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    id: &str,
    mut record: OperationRecord,
) -> Result<OperationRecord> {
    let user = ctx.require_user()?;

    record.validate()?;

    let existing = ctx.store.fetch_by_id(id)?;

    record.date = input_date_to_stored(&record.date);
    record.created_at = existing.created_at;

    if record.distribution.is_none() {
        record.distribution = existing
            .distribution
            .clone()
            .map(|distribution| prune_unlisted(distribution, &existing, &record));
        record.total_amount = record.total_amount.or(existing.total_amount);
        record.exact_expense = record.exact_expense.or(existing.exact_expense);
    }

    for (key, value) in existing.extra {
        record.extra.entry(key).or_insert(value);
    }

    ctx.store.save(id, record)?;
    let updated = ctx.store.fetch_by_id(id)?;

    emit(&OperationUpdated {
        id: id.to_string(),
        user,
        timestamp: updated.updated_at.unwrap_or_default(),
    });

    Ok(updated)
}

/// Drops stored shares of people the form removed from a role's list
fn prune_unlisted(
    mut distribution: DistributionSnapshot,
    existing: &OperationRecord,
    record: &OperationRecord,
) -> DistributionSnapshot {
    if let DistributionSnapshot::Current(current) = &mut distribution {
        for role in Role::ALL {
            let listed = record.names(role);
            if listed != existing.names(role) {
                tracing::debug!(%role, ?listed, "personnel changed, pruning stored shares");
                current.retain_listed(role, &listed);
            }
        }
    }
    distribution
}
