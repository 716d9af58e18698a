use crate::{
    errors::Result,
    events::{emit, OperationCreated},
    record::{input_date_to_stored, OperationRecord},
    store::{RecordStore, SessionProvider},
};

use super::Context;

/// Validates and stores a new operation
/// Requires a signed-in user
pub fn handler<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    mut record: OperationRecord,
) -> Result<OperationRecord> {
    let user = ctx.require_user()?;

    // Validate required fields before touching the store
    record.validate()?;

    // Dates arrive in input form and are stored as DD/MM/YYYY
    record.date = input_date_to_stored(&record.date);
    record.id = None;

    let created = ctx.store.create(record)?;
    let id = created.id.clone().unwrap_or_default();

    emit(&OperationCreated {
        id,
        user,
        timestamp: created.created_at.unwrap_or_default(),
    });

    Ok(created)
}
