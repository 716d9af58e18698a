//! Structured events emitted through `tracing`.
//!
//! Events are logged under the `operation_splits::events` target with a JSON
//! payload. The crate never installs a subscriber; callers choose where
//! events go.

use serde::Serialize;

use crate::state::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

pub trait Event: Serialize {
    const NAME: &'static str;
    const SEVERITY: Severity = Severity::Info;
}

/// Logs an event at its severity
pub fn emit<E: Event>(event: &E) {
    match E::SEVERITY {
        Severity::Debug => tracing::debug!(
            target: "operation_splits::events",
            event = E::NAME,
            payload = %payload(event)
        ),
        Severity::Info => tracing::info!(
            target: "operation_splits::events",
            event = E::NAME,
            payload = %payload(event)
        ),
        Severity::Warn => tracing::warn!(
            target: "operation_splits::events",
            event = E::NAME,
            payload = %payload(event)
        ),
    }
}

fn payload<E: Event>(event: &E) -> String {
    serde_json::to_string(event).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantAdded {
    pub name: String,
    pub role: Role,
    pub share_percent: f64,
}

impl Event for ParticipantAdded {
    const NAME: &'static str = "participant_added";
    const SEVERITY: Severity = Severity::Debug;
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantRemoved {
    pub name: String,
    pub role: Role,
}

impl Event for ParticipantRemoved {
    const NAME: &'static str = "participant_removed";
    const SEVERITY: Severity = Severity::Debug;
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareUpdated {
    pub name: String,
    pub role: Role,
    pub share_percent: f64,
}

impl Event for ShareUpdated {
    const NAME: &'static str = "share_updated";
    const SEVERITY: Severity = Severity::Debug;
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationRecomputed {
    pub total_amount: u64,
    pub exact_expense: u64,
    pub participant_count: usize,
    pub company_share_percent: f64,
    pub expense_share_percent: f64,
    pub aggregate_total_percent: f64,
}

impl Event for AllocationRecomputed {
    const NAME: &'static str = "allocation_recomputed";
    const SEVERITY: Severity = Severity::Debug;
}

#[derive(Debug, Clone, Serialize)]
pub struct OverageDetected {
    pub aggregate_total_percent: f64,
    pub overage_amount: u64,
}

impl Event for OverageDetected {
    const NAME: &'static str = "overage_detected";
    const SEVERITY: Severity = Severity::Warn;
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationCreated {
    pub id: String,
    pub user: String,
    pub timestamp: i64,
}

impl Event for OperationCreated {
    const NAME: &'static str = "operation_created";
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationUpdated {
    pub id: String,
    pub user: String,
    pub timestamp: i64,
}

impl Event for OperationUpdated {
    const NAME: &'static str = "operation_updated";
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSaved {
    pub id: String,
    pub user: String,
    pub total_amount: u64,
    pub exact_expense: u64,
    pub company_share_percent: f64,
    pub aggregate_total_percent: f64,
    pub overage_amount: u64,
    pub timestamp: i64,
}

impl Event for DistributionSaved {
    const NAME: &'static str = "distribution_saved";
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationDeleted {
    pub id: String,
    pub user: String,
    pub timestamp: i64,
}

impl Event for OperationDeleted {
    const NAME: &'static str = "operation_deleted";
}
