use std::{future::Future, pin::Pin};

mod errors;
mod record;
mod store;
mod upload;

pub use errors::{StoreError, StoreResult};
pub use record::{
    AttachmentRef, Location, Record, RecordDraft, RecordId, RecordPatch, Relation, RelationKind,
    Visibility,
};
pub use store::{RecordQuery, RecordStore, StoreBox};
pub use upload::{FileUploader, LocalFile, UploaderBox};

pub type PinFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
