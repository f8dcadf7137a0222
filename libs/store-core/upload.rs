use std::path::PathBuf;

use derive_more::{Deref, DerefMut};

use crate::{record::AttachmentRef, PinFuture, StoreResult};

/// Local file handle passed to the upload collaborator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LocalFile {
    pub path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Deref, DerefMut)]
#[deref(forward)]
#[deref_mut(forward)]
pub struct UploaderBox(Box<dyn FileUploader>);

impl UploaderBox {
    pub fn new(uploader: impl FileUploader + 'static) -> Self {
        Self(Box::new(uploader))
    }
}

/// Boundary to the external upload collaborator.
pub trait FileUploader: Send + Sync {
    /// Upload a batch of local files. The returned references correspond to
    /// the input files in order. All-or-nothing: any single failure fails
    /// the whole batch and no reference is returned.
    fn upload_all(&self, files: Vec<LocalFile>) -> PinFuture<StoreResult<Vec<AttachmentRef>>>;
}
