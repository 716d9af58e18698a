use crate::{
    errors::Result,
    events::{emit, OperationDeleted},
    store::{RecordStore, SessionProvider},
};

use super::Context;

/// Deletes an operation
/// Requires a signed-in user
pub fn handler<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    id: &str,
) -> Result<()> {
    let user = ctx.require_user()?;

    ctx.store.delete(id)?;

    emit(&OperationDeleted {
        id: id.to_string(),
        user,
        timestamp: chrono::Utc::now().timestamp(),
    });

    Ok(())
}
