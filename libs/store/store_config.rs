use serde::de::DeserializeOwned;

use daybook_store_core::{StoreBox, UploaderBox};

pub trait StoreConfig: DeserializeOwned + Default {
    type Store: daybook_store_core::RecordStore;

    fn to_store(self) -> StoreBox;

    /// Upload collaborator paired with this store type.
    fn to_uploader(&self) -> UploaderBox;
}
