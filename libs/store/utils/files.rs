use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use daybook_store_core::{StoreError, StoreResult};

pub fn check_path_is_directory(path: &Path) -> StoreResult<()> {
    if !path.exists() {
        return Err(StoreError::OperationFailed(format!(
            "Directory {path:?} doesn't exist"
        )));
    } else if !path.is_dir() {
        return Err(StoreError::OperationFailed(format!(
            "Path {path:?} is not a directory"
        )));
    }
    Ok(())
}

/// Create directory and all necessary parent directories of a given path
pub fn create_dir_if_not_exists_deep(path: &Path) -> StoreResult<()> {
    std::fs::create_dir_all(path).map_err(StoreError::operation_failed)?;
    Ok(())
}

pub fn read_json_document<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> StoreResult<Option<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let mut file = File::open(path).map_err(StoreError::operation_failed)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(StoreError::operation_failed)?;
    let data = serde_json::from_str(&contents).map_err(StoreError::corrupted_document)?;
    Ok(Some(data))
}

pub fn save_json_document<T: Serialize, P: AsRef<Path>>(path: P, data: &T) -> StoreResult<()> {
    let serialized = serde_json::to_string(data).map_err(StoreError::operation_failed)?;
    let mut file = File::create(path).map_err(StoreError::operation_failed)?;
    file.write_all(serialized.as_bytes())
        .map_err(StoreError::operation_failed)?;
    Ok(())
}
