//! Record store and session boundaries.
//!
//! The engine never talks to a database directly. Callers plug their store
//! in through `RecordStore`; `InMemoryStore` backs scripts and tests.

use std::{cmp::Ordering, collections::BTreeMap};

use crate::{
    constants::OPERATION_ID_PREFIX,
    errors::StoreError,
    record::{OperationRecord, OperationStatus},
};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Field an operation list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Date,
    Client,
    Location,
    Kind,
    Drone,
    Status,
}

pub trait RecordStore {
    fn fetch_by_id(&self, id: &str) -> StoreResult<OperationRecord>;

    /// Replaces an existing record
    fn save(&mut self, id: &str, record: OperationRecord) -> StoreResult<()>;

    /// Stores a new record and returns it with its assigned id and timestamps
    fn create(&mut self, record: OperationRecord) -> StoreResult<OperationRecord>;

    fn list(&self) -> StoreResult<Vec<OperationRecord>>;

    fn delete(&mut self, id: &str) -> StoreResult<()>;

    fn search(&self, term: &str) -> StoreResult<Vec<OperationRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| record.matches(term))
            .collect())
    }

    fn list_by_status(&self, status: OperationStatus) -> StoreResult<Vec<OperationRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| record.status == status)
            .collect())
    }

    fn list_sorted(&self, field: SortField, ascending: bool) -> StoreResult<Vec<OperationRecord>> {
        let mut records = self.list()?;
        records.sort_by(|a, b| {
            let ordering = compare_by(a, b, field);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        Ok(records)
    }
}

fn compare_by(a: &OperationRecord, b: &OperationRecord, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        // Unparseable dates sort first
        SortField::Date => a.parsed_date().cmp(&b.parsed_date()),
        SortField::Client => a.client.cmp(&b.client),
        SortField::Location => a.location.cmp(&b.location),
        SortField::Kind => a.kind.cmp(&b.kind),
        SortField::Drone => a.drone.cmp(&b.drone),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// Identity of whoever is driving the session, if anyone
pub trait SessionProvider {
    fn current_user(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSession {
    user: Option<String>,
}

impl StaticSession {
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

/// Ordered in-memory store handing out `OP-001`-style ids
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: BTreeMap<String, OperationRecord>,
    next_id: u32,
    reject_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds records that already carry an id
    pub fn with_records(records: impl IntoIterator<Item = OperationRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            if let Some(id) = record.id.clone() {
                store.records.insert(id, record);
                store.next_id += 1;
            }
        }
        store
    }

    /// Makes every subsequent write fail, for exercising error paths
    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        if self.reject_writes {
            return Err(StoreError::Failure("store is read-only".to_string()));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{OPERATION_ID_PREFIX}{:03}", self.next_id);
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }
}

impl RecordStore for InMemoryStore {
    fn fetch_by_id(&self, id: &str) -> StoreResult<OperationRecord> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&mut self, id: &str, mut record: OperationRecord) -> StoreResult<()> {
        self.ensure_writable()?;

        let existing = self
            .records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.id = Some(id.to_string());
        record.created_at = record.created_at.or(existing.created_at);
        record.updated_at = Some(chrono::Utc::now().timestamp());
        self.records.insert(id.to_string(), record);
        Ok(())
    }

    fn create(&mut self, mut record: OperationRecord) -> StoreResult<OperationRecord> {
        self.ensure_writable()?;

        let id = self.allocate_id();
        let now = chrono::Utc::now().timestamp();
        record.id = Some(id.clone());
        record.created_at = Some(now);
        record.updated_at = Some(now);

        self.records.insert(id, record.clone());
        Ok(record)
    }

    fn list(&self) -> StoreResult<Vec<OperationRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.ensure_writable()?;

        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
