use chrono::{Local, TimeZone};
use daybook_config::{AiConfig, CoreConfig};
use daybook_store_core::{
    AttachmentRef, LocalFile, Location, Record, RecordDraft, RecordId, RecordPatch, RecordQuery,
    Relation, StoreBox, StoreError, UploaderBox, Visibility,
};
use tracing::warn;

mod annotate;
pub mod config;
pub mod day_key;
mod day_lock;
mod errors;
pub mod group;
mod load;
mod locate;
mod normalize;
mod suggest;
mod utils;

pub use annotate::AnnotationList;
pub use errors::{CoreError, CoreResult};
pub use group::{count_checklist_items, group_records, DailyGroup};
pub use load::{load, load_core};
pub use normalize::normalize;
pub use utils::unix_now;

use day_lock::DayLocks;

/// How many times an append is replayed after losing a version race.
const APPEND_ATTEMPTS: usize = 3;

pub struct Core {
    store: StoreBox,
    uploader: UploaderBox,
    day_locks: DayLocks,
    pub config: CoreConfig,
    ai: Option<AiConfig>,
    http: reqwest::Client,
    /// Ok - found | Err - not found with error reason
    found_config_file: Result<(), eyre::Error>,
}

#[derive(Debug, Default)]
pub struct SaveTodoInput {
    pub content: String,
    pub local_files: Vec<LocalFile>,
    pub attachments: Vec<AttachmentRef>,
    pub visibility: Visibility,
    pub relations: Vec<Relation>,
    pub location: Option<Location>,
    pub creator_id: String,
    /// Target day; resolved from the wall clock when absent.
    pub day_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub record_id: RecordId,
    pub created: bool,
}

impl Core {
    /// Build a core over explicit collaborators; configuration-driven
    /// construction goes through `load`.
    pub fn new(store: StoreBox, uploader: UploaderBox) -> Self {
        Self {
            store,
            uploader,
            day_locks: DayLocks::new(),
            config: CoreConfig::default(),
            ai: None,
            http: reqwest::Client::new(),
            found_config_file: Ok(()),
        }
    }

    pub async fn initialize(&self) -> eyre::Result<()> {
        self.store.init().await?;
        Ok(())
    }

    pub async fn save_todo(&self, input: SaveTodoInput) -> CoreResult<SaveOutcome> {
        self.save_todo_in(input, &Local).await
    }

    /// Folds one todo into the creator's daily container: uploads the
    /// attachments, then appends to the day's container or creates it.
    /// Saves sharing a `(creator, day)` key are serialized, so concurrent
    /// callers append instead of racing the create path.
    #[tracing::instrument(skip(self, input, tz), fields(creator = %input.creator_id))]
    pub async fn save_todo_in<Tz>(&self, input: SaveTodoInput, tz: &Tz) -> CoreResult<SaveOutcome>
    where
        Tz: TimeZone + Sync,
    {
        let SaveTodoInput {
            content,
            local_files,
            attachments,
            visibility,
            relations,
            location,
            creator_id,
            day_key,
        } = input;

        if content.trim().is_empty() {
            return Err(CoreError::EmptyContent);
        }

        // Attachments first: nothing below runs on a partial upload.
        let mut new_attachments = attachments;
        if !local_files.is_empty() {
            let uploaded = self
                .uploader
                .upload_all(local_files)
                .await
                .map_err(CoreError::Upload)?;
            new_attachments.extend(uploaded);
        }

        let today = day_key::key_of(utils::unix_now(), tz);
        let day_key = day_key.unwrap_or_else(|| today.clone());
        let (day_start, _) = day_key::bounds_of(&day_key, tz)?;

        let _lock = self.day_locks.acquire(&creator_id, &day_key).await;

        let mut attempts = 0;
        loop {
            match self.find_container_in(&creator_id, &day_key, tz).await? {
                Some(existing) => {
                    let merged_content =
                        format!("{}\n{}", existing.content, normalize::normalize(&content));
                    let mut merged_attachments = existing.attachments.clone();
                    merged_attachments.extend(new_attachments.iter().cloned());

                    let patch = RecordPatch::default()
                        .set_content(merged_content)
                        .set_attachments(merged_attachments)
                        .set_updated_at(utils::unix_now());

                    match self
                        .store
                        .update_record(existing.id.clone(), patch, Some(existing.version))
                        .await
                    {
                        Ok(updated) => {
                            return Ok(SaveOutcome {
                                record_id: updated.id,
                                created: false,
                            })
                        }
                        Err(StoreError::VersionConflict(_)) if attempts + 1 < APPEND_ATTEMPTS => {
                            attempts += 1;
                            warn!(attempts, "container changed under append, replaying merge");
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                None => {
                    let full_content = format!(
                        "{}\n\n{}",
                        day_key::title_line_of(&day_key),
                        normalize::normalize(&content)
                    );
                    let draft = RecordDraft {
                        creator_id: creator_id.clone(),
                        content: full_content,
                        attachments: new_attachments.clone(),
                        visibility,
                        parent: None,
                        relations: relations.clone(),
                        location: location.clone(),
                        // Pin explicitly targeted days into their creation
                        // window so later saves can locate the container.
                        created_at: (day_key != today).then_some(day_start),
                    };
                    // Not retried: replaying a failed create without an
                    // idempotency key risks duplicate containers.
                    let record = self.store.create_record(draft).await?;
                    return Ok(SaveOutcome {
                        record_id: record.id,
                        created: true,
                    });
                }
            }
        }
    }

    pub async fn list_creator_records(
        &self,
        creator_id: &str,
        limit: Option<u32>,
    ) -> CoreResult<Vec<Record>> {
        let records = self
            .store
            .list_records(RecordQuery {
                creator_id: Some(creator_id.to_owned()),
                limit,
                ..Default::default()
            })
            .await?;
        Ok(records)
    }

    pub fn get_inner_store(&self) -> &StoreBox {
        &self.store
    }

    pub fn has_found_config_file(&self) -> &Result<(), eyre::Error> {
        &self.found_config_file
    }
}
