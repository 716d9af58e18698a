#![allow(ambiguous_glob_reexports)]

pub mod create_operation;
pub mod delete_operation;
pub mod load_operation;
pub mod save_distribution;
pub mod update_operation;

pub use create_operation::*;
pub use delete_operation::*;
pub use load_operation::*;
pub use save_distribution::*;
pub use update_operation::*;

use crate::{
    config::EngineConfig,
    errors::{AllocationError, Result},
    store::{RecordStore, SessionProvider},
};

/// Collaborators a session operation runs against
pub struct Context<'a, S: RecordStore, P: SessionProvider> {
    pub store: &'a mut S,
    pub session: &'a P,
    pub config: &'a EngineConfig,
}

impl<'a, S: RecordStore, P: SessionProvider> Context<'a, S, P> {
    pub fn new(store: &'a mut S, session: &'a P, config: &'a EngineConfig) -> Self {
        Self {
            store,
            session,
            config,
        }
    }

    /// Signed-in user, required for anything that writes
    pub(crate) fn require_user(&self) -> Result<String> {
        self.session
            .current_user()
            .map(str::to_string)
            .ok_or(AllocationError::Unauthorized)
    }
}
