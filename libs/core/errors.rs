use daybook_store_core::{RecordId, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("content is empty")]
    EmptyContent,
    #[error("attachment upload failed")]
    Upload(#[source] StoreError),
    #[error("invalid day key: {0}")]
    InvalidDayKey(String),
    #[error("annotation not found: {0}")]
    AnnotationNotFound(RecordId),
    #[error("annotated record not found: {0}")]
    AnnotationParentNotFound(RecordId),
    #[error("tag suggestion failed: {0}")]
    Suggest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
