use crate::{
    codec::{decode, DecodeIntent},
    errors::Result,
    record::{stored_date_to_input, OperationRecord},
    state::AllocationState,
    store::{RecordStore, SessionProvider},
};

use super::Context;

/// A fetched record together with its working allocation
#[derive(Debug, Clone)]
pub struct LoadedOperation {
    pub record: OperationRecord,
    pub allocation: AllocationState,
}

/// Fetches an operation and decodes its distribution
/// Loading for `Edit` converts the stored date into input form
pub fn handler<S: RecordStore, P: SessionProvider>(
    ctx: &Context<'_, S, P>,
    id: &str,
    intent: DecodeIntent,
) -> Result<LoadedOperation> {
    let mut record = ctx.store.fetch_by_id(id)?;

    let allocation = decode(&record, intent, ctx.config)?;

    if intent == DecodeIntent::Edit {
        record.date = stored_date_to_input(&record.date);
    }

    tracing::debug!(
        id,
        ?intent,
        participants = allocation.roster().len(),
        aggregate_total_percent = allocation.aggregate_total_percent(),
        "operation loaded"
    );

    Ok(LoadedOperation { record, allocation })
}
