//! Shared fixtures for operation-splits integration tests
//!
//! Records mirror the shapes found in the document store: the older
//! single-pilot form with a four-bucket distribution, and the roster form
//! with per-name share maps.

#![allow(dead_code)]

pub mod records;

pub use records::*;

use operation_splits::{
    DistributionMode, EngineConfig, InMemoryStore, OperationRecord, StaticSession,
};

pub const USER: &str = "coordinador@example.com";

/// Store seeded with one record of each shape plus one without personnel
///
/// - OP-001: legacy single pilot/helper, four-bucket distribution
/// - OP-002: roster shape, balanced at 100%
/// - OP-003: no personnel, no distribution
pub fn setup_store() -> InMemoryStore {
    InMemoryStore::with_records([
        with_id(legacy_record(), "OP-001"),
        with_id(current_record(), "OP-002"),
        with_id(bare_record(), "OP-003"),
    ])
}

pub fn signed_in() -> StaticSession {
    StaticSession::signed_in(USER)
}

pub fn anonymous() -> StaticSession {
    StaticSession::anonymous()
}

pub fn flexible() -> EngineConfig {
    EngineConfig::default()
}

pub fn strict() -> EngineConfig {
    EngineConfig {
        mode: DistributionMode::Strict,
        ..EngineConfig::default()
    }
}

pub fn with_id(mut record: OperationRecord, id: &str) -> OperationRecord {
    record.id = Some(id.to_string());
    record
}
