mod store_config;

pub use daybook_store_core::{
    AttachmentRef, FileUploader, LocalFile, Location, PinFuture, Record, RecordDraft, RecordId,
    RecordPatch, RecordQuery, RecordStore, Relation, RelationKind, StoreBox, StoreError,
    StoreResult, UploaderBox, Visibility,
};
pub use store_config::StoreConfig;

pub mod store {
    pub mod in_memory;
    pub mod local;
}

pub(crate) mod utils {
    pub(crate) mod files;
    pub(crate) mod time;
}

use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BuiltinStoreType {
    Local,
    InMemory,
}
