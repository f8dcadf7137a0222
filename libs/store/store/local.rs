use std::path::{Path, PathBuf};

use serde_derive::Deserialize;
use tracing::trace;
use ulid::Ulid;

use crate::{
    store_config::StoreConfig,
    utils::{files, time::unix_now},
    AttachmentRef, FileUploader, LocalFile, PinFuture, Record, RecordDraft, RecordId, RecordPatch,
    RecordQuery, RecordStore, StoreBox, StoreError, StoreResult, UploaderBox,
};

const DEFAULT_STORE_PATH: &str = "~/.local/share/daybook/records";

/// Save records as one json document per record inside a local directory.
pub struct LocalStore {
    config: LocalStoreConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LocalStoreConfig {
    /// Path of the record document directory (default: ~/.local/share/daybook/records)
    pub store_path: Option<String>,
}

impl LocalStoreConfig {
    pub fn get_store_path(&self) -> StoreResult<String> {
        let path = self
            .store_path
            .clone()
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_owned());
        let expanded = shellexpand::full(&path).map_err(StoreError::operation_failed)?;
        Ok(expanded.to_string())
    }

    fn record_path(&self, record_id: &str) -> StoreResult<PathBuf> {
        let store_path = self.get_store_path()?;
        Ok(Path::new(&store_path).join(format!("{record_id}.json")))
    }

    fn attachments_path(&self) -> StoreResult<PathBuf> {
        let store_path = self.get_store_path()?;
        Ok(Path::new(&store_path).join("attachments"))
    }
}

impl StoreConfig for LocalStoreConfig {
    type Store = LocalStore;

    fn to_store(self) -> StoreBox {
        StoreBox::new(LocalStore { config: self })
    }

    fn to_uploader(&self) -> UploaderBox {
        UploaderBox::new(LocalUploader {
            config: self.clone(),
        })
    }
}

impl LocalStore {
    fn check_is_init(&self) -> StoreResult<()> {
        let store_path = self.config.get_store_path()?;
        files::check_path_is_directory(Path::new(&store_path))
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        let store_path = self.config.get_store_path()?;
        let entries = std::fs::read_dir(&store_path).map_err(StoreError::operation_failed)?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(StoreError::operation_failed)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(record) = files::read_json_document::<Record, _>(&path)? {
                records.push(record);
            }
        }
        Ok(records)
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

impl RecordStore for LocalStore {
    fn init(&self) -> PinFuture<StoreResult<()>> {
        Box::pin(async move {
            let store_path = self.config.get_store_path()?;
            files::create_dir_if_not_exists_deep(Path::new(&store_path))?;
            files::create_dir_if_not_exists_deep(&self.config.attachments_path()?)?;
            Ok(())
        })
    }

    fn create_record(&self, draft: RecordDraft) -> PinFuture<StoreResult<Record>> {
        Box::pin(async move {
            self.check_is_init()?;
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
            trace!(record_id = %record.id, "save record document");
            files::save_json_document(self.config.record_path(&record.id)?, &record)?;
            Ok(record)
        })
    }

    fn get_record(&self, record_id: RecordId) -> PinFuture<StoreResult<Record>> {
        Box::pin(async move {
            self.check_is_init()?;
            files::read_json_document(self.config.record_path(&record_id)?)?
                .ok_or(StoreError::NotFound(record_id))
        })
    }

    fn list_records(&self, query: RecordQuery) -> PinFuture<StoreResult<Vec<Record>>> {
        Box::pin(async move {
            query.validate()?;
            self.check_is_init()?;

            let mut matching: Vec<Record> = self
                .list_all()?
                .into_iter()
                .filter(|record| matches_query(record, &query))
                .collect();

            matching.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            });

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
            self.check_is_init()?;
            let path = self.config.record_path(&record_id)?;
            let current: Record = files::read_json_document(&path)?
                .ok_or_else(|| StoreError::NotFound(record_id.clone()))?;

            if let Some(expected) = expected_version {
                if current.version != expected {
                    return Err(StoreError::VersionConflict(record_id));
                }
            }

            let updated = patch.merge_with_record(&current);
            files::save_json_document(&path, &updated)?;
            Ok(updated)
        })
    }

    fn delete_record(&self, record_id: RecordId) -> PinFuture<StoreResult<()>> {
        Box::pin(async move {
            self.check_is_init()?;
            let path = self.config.record_path(&record_id)?;
            if !path.exists() {
                return Err(StoreError::NotFound(record_id));
            }
            std::fs::remove_file(path).map_err(StoreError::operation_failed)?;
            Ok(())
        })
    }
}

/// Copies files into the store's attachments directory and references them
/// by their relative path.
pub struct LocalUploader {
    config: LocalStoreConfig,
}

impl FileUploader for LocalUploader {
    fn upload_all(&self, files: Vec<LocalFile>) -> PinFuture<StoreResult<Vec<AttachmentRef>>> {
        Box::pin(async move {
            let attachments_path = self.config.attachments_path()?;
            files::create_dir_if_not_exists_deep(&attachments_path)?;

            // Reject the whole batch before copying anything.
            for file in &files {
                if !file.path.is_file() {
                    return Err(StoreError::upload_failed(format!(
                        "not a readable file: {:?}",
                        file.path
                    )));
                }
            }

            let mut refs: Vec<AttachmentRef> = Vec::with_capacity(files.len());
            let mut copied: Vec<PathBuf> = Vec::new();
            for file in &files {
                match copy_one(&attachments_path, &file.path) {
                    Ok(stored_name) => {
                        copied.push(attachments_path.join(&stored_name));
                        refs.push(format!("attachments/{stored_name}"));
                    }
                    Err(err) => {
                        // All-or-nothing: roll back files copied so far.
                        for path in copied {
                            let _ = std::fs::remove_file(path);
                        }
                        return Err(err);
                    }
                }
            }
            Ok(refs)
        })
    }
}

fn copy_one(attachments_path: &Path, source: &Path) -> StoreResult<String> {
    let name = source
        .file_name()
        .ok_or_else(|| StoreError::upload_failed(format!("file has no name: {source:?}")))?;
    let stored_name = format!("{}-{}", Ulid::new(), name.to_string_lossy());
    std::fs::copy(source, attachments_path.join(&stored_name))
        .map_err(StoreError::upload_failed)?;
    Ok(stored_name)
}
