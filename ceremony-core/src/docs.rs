use crate::error::{CoreError, Result};
use ceremony_store::{Filter, Path, Store};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads and deserializes a document, or `None` if absent.
pub(crate) fn load<T: DeserializeOwned>(store: &dyn Store, path: &Path) -> Result<Option<T>> {
    let Some(value) = store.get(path)? else {
        return Ok(None);
    };
    let doc = serde_json::from_value(value)
        .map_err(|e| CoreError::Internal(format!("malformed document at {path}: {e}")))?;
    Ok(Some(doc))
}

/// Like [`load`], but maps a missing document to `NOT_FOUND`.
pub(crate) fn load_required<T: DeserializeOwned>(
    store: &dyn Store,
    path: &Path,
    what: &str,
) -> Result<T> {
    load(store, path)?.ok_or_else(|| CoreError::NotFound(format!("{what} not found at {path}")))
}

pub(crate) fn load_all<T: DeserializeOwned>(
    store: &dyn Store,
    collection: &Path,
    filters: &[Filter],
) -> Result<Vec<(Path, T)>> {
    store
        .query(collection, filters)?
        .into_iter()
        .map(|(path, value)| {
            let doc = serde_json::from_value(value).map_err(|e| {
                CoreError::Internal(format!("malformed document at {path}: {e}"))
            })?;
            Ok((path, doc))
        })
        .collect()
}

pub(crate) fn to_value<T: Serialize>(doc: &T) -> Result<serde_json::Value> {
    serde_json::to_value(doc)
        .map_err(|e| CoreError::Internal(format!("failed to serialize document: {e}")))
}
