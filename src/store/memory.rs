use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use time::OffsetDateTime;

use super::CallStore;
use crate::call::{Annotation, Call, Id, NewCall, TelephonyUpdate};
use crate::errors::CallCenterError;
use crate::query::Query;
use crate::timestamp;

/// Supplies creation timestamps.
pub type Clock = dyn Fn() -> OffsetDateTime + Send + Sync;

/// Keeps every call in memory, guarded by a single lock.
pub struct MemoryStore {
    calls: RwLock<Calls>,
    clock: Box<Clock>,
}

struct Calls {
    next_id: Id,

    /// Sorted by ID, since IDs only ever grow.
    records: Vec<Call>,
}

impl Calls {
    fn position(&self, id: Id) -> Result<usize, CallCenterError> {
        self.records
            .binary_search_by_key(&id, |call| call.id)
            .map_err(|_| CallCenterError::NotFound(id))
    }
}

impl Default for Calls {
    fn default() -> Self {
        Calls {
            next_id: 1,
            records: vec![],
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(timestamp::now)
    }

    /// Creates an empty store whose calls are stamped by `clock`.
    pub fn with_clock(clock: impl Fn() -> OffsetDateTime + Send + Sync + 'static) -> Self {
        MemoryStore {
            calls: RwLock::new(Calls::default()),
            clock: Box::new(clock),
        }
    }

    // no writer panics partway through a record, so poisoned data is still consistent
    fn read(&self) -> RwLockReadGuard<'_, Calls> {
        self.calls.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Calls> {
        self.calls.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CallStore for MemoryStore {
    fn create(&self, new_call: NewCall) -> Call {
        let mut calls = self.write();

        let id = calls.next_id;
        calls.next_id += 1;

        let call = Call::new(id, (self.clock)(), new_call);
        calls.records.push(call.clone());

        call
    }

    fn update(&self, id: Id, annotation: Annotation) -> Result<Call, CallCenterError> {
        let mut calls = self.write();

        let index = calls.position(id)?;
        let classification = annotation.validate()?;

        let call = &mut calls.records[index];
        call.classify(classification);

        Ok(call.clone())
    }

    fn get(&self, id: Id) -> Result<Call, CallCenterError> {
        let calls = self.read();
        let index = calls.position(id)?;

        Ok(calls.records[index].clone())
    }

    fn list(&self, query: &Query) -> Vec<Call> {
        self.read()
            .records
            .iter()
            .filter(|call| query.matches(call))
            .cloned()
            .collect()
    }

    fn ingest(&self, id: Id, update: TelephonyUpdate) -> Result<Call, CallCenterError> {
        let mut calls = self.write();
        let index = calls.position(id)?;

        let call = &mut calls.records[index];
        call.apply(update);

        Ok(call.clone())
    }
}
