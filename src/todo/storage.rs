use super::data::*;
use tracing::{debug, info, warn};

use std::fs;
use std::io;
use std::path::Path;

use crate::internal_error::{InternalError, InternalResult};

pub const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Rebuilds the id map from a JSON array of task records.
pub fn collection_from_json(json: &str) -> InternalResult<Collection> {
    let records: Vec<Task> = serde_json::from_str(json)?;

    Ok(records.into_iter().map(|task| (task.id, task)).collect())
}

pub fn collection_to_json(collection: &Collection) -> InternalResult<String> {
    let records = collection.values().collect::<Vec<&Task>>();

    Ok(serde_json::to_string_pretty(&records)?)
}

/// Reads the store. A missing or unreadable file yields an empty collection.
pub fn load_collection(path: &Path) -> Collection {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no task store yet");
            return Collection::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read task store");
            return Collection::new();
        }
    };

    match collection_from_json(&json) {
        Ok(collection) => {
            debug!(path = %path.display(), tasks = collection.len(), "loaded task store");
            collection
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "task store is not valid, starting empty");
            Collection::new()
        }
    }
}

/// Overwrites the store with the whole collection.
pub fn save_collection(path: &Path, collection: &Collection) -> InternalResult<()> {
    let json = collection_to_json(collection)?;

    fs::write(path, json).map_err(|source| InternalError::Store {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), tasks = collection.len(), "saved task store");

    Ok(())
}

/// Deletes the store file. Returns false when there was nothing to delete.
pub fn reset_store(path: &Path) -> InternalResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed task store");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(InternalError::Store {
            path: path.to_path_buf(),
            source,
        }),
    }
}
