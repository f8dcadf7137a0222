use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("record version conflict: {0}")]
    VersionConflict(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("couldn't parse store document: {0}")]
    CorruptedDocument(String),
    #[error("invalid listing query: {0}")]
    InvalidQuery(String),
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

impl StoreError {
    pub fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    pub fn upload_failed<E: std::fmt::Display>(err: E) -> Self {
        Self::UploadFailed(err.to_string())
    }

    pub fn corrupted_document<E: std::fmt::Display>(err: E) -> Self {
        Self::CorruptedDocument(err.to_string())
    }

    pub fn operation_failed<E: std::fmt::Display>(err: E) -> Self {
        Self::OperationFailed(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
