use crate::call::{Annotation, Call, Id, NewCall, TelephonyUpdate};
use crate::errors::CallCenterError;
use crate::query::Query;

mod memory;

pub use memory::{Clock, MemoryStore};

/// Owns the call collection. Implementations serialize writes, so that
/// IDs are never handed out twice and an update is seen whole or not at
/// all.
pub trait CallStore: Send + Sync {
    /// Registers a new call, stamping it with the next ID and the current
    /// time.
    fn create(&self, new_call: NewCall) -> Call;

    /// Classifies an existing call.
    fn update(&self, id: Id, annotation: Annotation) -> Result<Call, CallCenterError>;

    /// Retrieves the given call.
    fn get(&self, id: Id) -> Result<Call, CallCenterError>;

    /// Returns the calls matching the query, in creation order.
    fn list(&self, query: &Query) -> Vec<Call>;

    /// Records telephony progress for an existing call.
    fn ingest(&self, id: Id, update: TelephonyUpdate) -> Result<Call, CallCenterError>;

    /// Returns every call, in creation order.
    fn export_all(&self) -> Vec<Call> {
        self.list(&Query::new())
    }
}
