use tokio::sync::RwLock;
use ulid::Ulid;

use crate::{
    store_config::StoreConfig, utils::time::unix_now, AttachmentRef, FileUploader, LocalFile,
    PinFuture, Record, RecordDraft, RecordId, RecordPatch, RecordQuery, RecordStore, StoreBox,
    StoreError, StoreResult, UploaderBox,
};
use serde_derive::Deserialize;

/// This store type is used for testing, data is not persisted to disk but
/// only present in memory. Records are kept in insertion order so listing
/// ties on `created_at` stay deterministic.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<Record>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct InMemoryStoreConfig {}

impl StoreConfig for InMemoryStoreConfig {
    type Store = InMemoryStore;

    fn to_store(self) -> StoreBox {
        StoreBox::new(InMemoryStore::default())
    }

    fn to_uploader(&self) -> UploaderBox {
        UploaderBox::new(MemoryUploader)
    }
}

fn matches_query(record: &Record, query: &RecordQuery) -> bool {
    if let Some(creator_id) = &query.creator_id {
        if &record.creator_id != creator_id {
            return false;
        }
    }
    if let Some(after) = query.created_after {
        if record.created_at < after {
            return false;
        }
    }
    if let Some(before) = query.created_before {
        if record.created_at >= before {
            return false;
        }
    }
    if let Some(parent) = &query.parent {
        if record.parent.as_deref() != Some(parent.as_str()) {
            return false;
        }
    }
    true
}

impl RecordStore for InMemoryStore {
    fn init(&self) -> PinFuture<StoreResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn create_record(&self, draft: RecordDraft) -> PinFuture<StoreResult<Record>> {
        Box::pin(async move {
            let now = unix_now();
            let created_at = draft.created_at.unwrap_or(now);
            let record = Record {
                id: Ulid::new().to_string(),
                creator_id: draft.creator_id,
                content: draft.content,
                attachments: draft.attachments,
                visibility: draft.visibility,
                parent: draft.parent,
                relations: draft.relations,
                location: draft.location,
                created_at,
                updated_at: now,
                display_at: Some(created_at),
                version: 1,
            };
            let mut records = self.records.write().await;
            records.push(record.clone());
            Ok(record)
        })
    }

    fn get_record(&self, record_id: RecordId) -> PinFuture<StoreResult<Record>> {
        Box::pin(async move {
            let records = self.records.read().await;
            records
                .iter()
                .find(|record| record.id == record_id)
                .cloned()
                .ok_or(StoreError::NotFound(record_id))
        })
    }

    fn list_records(&self, query: RecordQuery) -> PinFuture<StoreResult<Vec<Record>>> {
        Box::pin(async move {
            query.validate()?;
            let records = self.records.read().await;
            let mut matching: Vec<Record> = records
                .iter()
                .filter(|record| matches_query(record, &query))
                .cloned()
                .collect();

            // Stable: same-second records keep their insertion order.
            matching.sort_by_key(|record| record.created_at);

            if let Some(limit) = query.limit {
                matching.truncate(limit as usize);
            }

            Ok(matching)
        })
    }

    fn update_record(
        &self,
        record_id: RecordId,
        patch: RecordPatch,
        expected_version: Option<u64>,
    ) -> PinFuture<StoreResult<Record>> {
        Box::pin(async move {
            let mut records = self.records.write().await;
            let current = records
                .iter_mut()
                .find(|record| record.id == record_id)
                .ok_or_else(|| StoreError::NotFound(record_id.clone()))?;

            if let Some(expected) = expected_version {
                if current.version != expected {
                    return Err(StoreError::VersionConflict(record_id));
                }
            }

            let updated = patch.merge_with_record(current);
            *current = updated.clone();
            Ok(updated)
        })
    }

    fn delete_record(&self, record_id: RecordId) -> PinFuture<StoreResult<()>> {
        Box::pin(async move {
            let mut records = self.records.write().await;
            let position = records
                .iter()
                .position(|record| record.id == record_id)
                .ok_or(StoreError::NotFound(record_id))?;
            records.remove(position);
            Ok(())
        })
    }
}

/// Uploader counterpart of the in-memory store; references files by name
/// without copying any byte.
pub struct MemoryUploader;

impl FileUploader for MemoryUploader {
    fn upload_all(&self, files: Vec<LocalFile>) -> PinFuture<StoreResult<Vec<AttachmentRef>>> {
        Box::pin(async move {
            files
                .iter()
                .map(|file| {
                    file.path
                        .file_name()
                        .map(|name| format!("mem://{}", name.to_string_lossy()))
                        .ok_or_else(|| {
                            StoreError::upload_failed(format!("file has no name: {:?}", file.path))
                        })
                })
                .collect()
        })
    }
}
