//! Revenue allocation for drone service operations.
//!
//! An operation's revenue is split between the operating company, the field
//! personnel (pilots and helpers) and a fixed expense. `AllocationState`
//! keeps the company share reconciled against every edit; the codec maps it
//! to and from the stored record; the functions below run the save/load
//! flows against a pluggable record store.

pub mod codec;
pub mod config;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod legacy;
pub mod percent;
pub mod reconciler;
pub mod record;
pub mod roster;
pub mod state;
pub mod store;

pub use codec::{decode, encode, DecodeIntent, EncodedDistribution};
pub use config::{DistributionMode, EngineConfig};
pub use currency::NumberLocale;
pub use errors::{AllocationError, ConfigError, StoreError};
pub use instructions::{Context, LoadedOperation, SaveOutcome};
pub use legacy::{LegacyBucket, LegacyDistribution};
pub use record::{DistributionSnapshot, OperationRecord, OperationStatus};
pub use roster::{Roster, ShareDefaults};
pub use state::{AllocationState, Overage, Participant, Role, ShareLine};
pub use store::{InMemoryStore, RecordStore, SessionProvider, SortField, StaticSession};

use errors::Result;

/// Loads an operation and its working allocation
/// Editing a record with no personnel or distribution fails with `MalformedRecord`
pub fn load_operation<S: RecordStore, P: SessionProvider>(
    ctx: &Context<'_, S, P>,
    id: &str,
    intent: DecodeIntent,
) -> Result<LoadedOperation> {
    instructions::load_operation::handler(ctx, id, intent)
}

/// Creates a new operation record
/// Only callable with a signed-in user
pub fn create_operation<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    record: OperationRecord,
) -> Result<OperationRecord> {
    instructions::create_operation::handler(ctx, record)
}

/// Updates an operation's form fields, keeping its stored distribution
/// Only callable with a signed-in user
pub fn update_operation<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    id: &str,
    record: OperationRecord,
) -> Result<OperationRecord> {
    instructions::update_operation::handler(ctx, id, record)
}

/// Encodes an allocation onto its record and saves it
/// Strict mode requires an exact 100% total; flexible mode reports overage
pub fn save_distribution<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    id: &str,
    allocation: &AllocationState,
) -> Result<SaveOutcome> {
    instructions::save_distribution::handler(ctx, id, allocation)
}

/// Deletes an operation
/// Only callable with a signed-in user
pub fn delete_operation<S: RecordStore, P: SessionProvider>(
    ctx: &mut Context<'_, S, P>,
    id: &str,
) -> Result<()> {
    instructions::delete_operation::handler(ctx, id)
}
