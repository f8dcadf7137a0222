use derive_more::{Deref, DerefMut};

use crate::{
    record::{Record, RecordDraft, RecordId, RecordPatch},
    PinFuture, StoreError, StoreResult,
};

/// Typed listing predicate. Built and validated locally so malformed
/// requests never reach the remote service.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RecordQuery {
    pub creator_id: Option<String>,
    /// Creation timestamp lower bound, inclusive (unix seconds).
    pub created_after: Option<u64>,
    /// Creation timestamp upper bound, exclusive (unix seconds).
    pub created_before: Option<u64>,
    pub parent: Option<RecordId>,
    pub limit: Option<u32>,
}

impl RecordQuery {
    pub fn validate(&self) -> StoreResult<()> {
        if let (Some(after), Some(before)) = (self.created_after, self.created_before) {
            if after >= before {
                return Err(StoreError::InvalidQuery(format!(
                    "empty creation range: [{after}, {before})"
                )));
            }
        }
        if self.limit == Some(0) {
            return Err(StoreError::InvalidQuery("limit must be positive".to_owned()));
        }
        Ok(())
    }
}

#[derive(Deref, DerefMut)]
#[deref(forward)]
#[deref_mut(forward)]
pub struct StoreBox(Box<dyn RecordStore>);

impl StoreBox {
    pub fn new(store: impl RecordStore + 'static) -> Self {
        Self(Box::new(store))
    }
}

/// Boundary to the external record service. Single-record operations are
/// assumed atomic on the service side.
pub trait RecordStore: Send + Sync {
    fn init(&self) -> PinFuture<StoreResult<()>>;

    /// Create a new record; identity is assigned by the store.
    fn create_record(&self, draft: RecordDraft) -> PinFuture<StoreResult<Record>>;

    // Get a record by id
    fn get_record(&self, record_id: RecordId) -> PinFuture<StoreResult<Record>>;

    /// List records matching the query, creation time ascending.
    fn list_records(&self, query: RecordQuery) -> PinFuture<StoreResult<Vec<Record>>>;

    /// Apply a partial update. When `expected_version` is set the update is
    /// rejected with `VersionConflict` unless it matches the stored record.
    fn update_record(
        &self,
        record_id: RecordId,
        patch: RecordPatch,
        expected_version: Option<u64>,
    ) -> PinFuture<StoreResult<Record>>;

    // Delete a record by id
    fn delete_record(&self, record_id: RecordId) -> PinFuture<StoreResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::RecordQuery;

    #[test]
    fn query_rejects_empty_creation_range() {
        let query = RecordQuery {
            created_after: Some(200),
            created_before: Some(200),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn query_accepts_half_open_range() {
        let query = RecordQuery {
            created_after: Some(100),
            created_before: Some(200),
            limit: Some(100),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }
}
