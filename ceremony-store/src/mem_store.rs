use crate::batch::{Batch, BatchOp};
use crate::filter::Filter;
use crate::path::Path;
use crate::store::Store;
use ceremony_base::{err, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A single-process, lock-protected document store. Not a production
/// backend (a real deployment points `Store` at a hosted document
/// database) but the reference implementation the core, its tests and the
/// standalone binary all run against; holding the mutex for the full batch
/// is what makes [`MemStore::commit_batch`] atomic.
#[derive(Default)]
pub struct MemStore {
    docs: Mutex<BTreeMap<String, Value>>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }

    fn merge_doc(existing: Option<Value>, incoming: Value, merge: bool) -> Value {
        match (existing, merge) {
            (Some(Value::Object(mut old)), true) => {
                if let Value::Object(new) = incoming {
                    for (k, v) in new {
                        old.insert(k, v);
                    }
                }
                Value::Object(old)
            }
            _ => incoming,
        }
    }
}

impl Store for MemStore {
    fn get(&self, path: &Path) -> Result<Option<Value>> {
        let docs = self.docs.lock().expect("store mutex poisoned");
        Ok(docs.get(&path.to_string()).cloned())
    }

    fn set(&self, path: &Path, doc: Value, merge: bool) -> Result<()> {
        let mut docs = self.docs.lock().expect("store mutex poisoned");
        let key = path.to_string();
        let existing = docs.get(&key).cloned();
        docs.insert(key, Self::merge_doc(existing, doc, merge));
        Ok(())
    }

    fn query(&self, collection: &Path, filters: &[Filter]) -> Result<Vec<(Path, Value)>> {
        let docs = self.docs.lock().expect("store mutex poisoned");
        let prefix = format!("{collection}/");
        let mut out = Vec::new();
        for (key, doc) in docs.iter() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            // Only direct children of `collection`, not grandchildren.
            if rest.contains('/') {
                continue;
            }
            if filters.iter().all(|f| f.matches(doc)) {
                out.push((collection.child(rest), doc.clone()));
            }
        }
        Ok(out)
    }

    fn commit_batch(&self, batch: Batch) -> Result<()> {
        let mut docs = self.docs.lock().expect("store mutex poisoned");
        // Validate every conditional precondition before writing anything,
        // so a failing batch never leaves a partial write behind.
        for op in batch.ops() {
            if let BatchOp::CreateIfAbsent { path, .. } = op {
                if docs.contains_key(&path.to_string()) {
                    return Err(err(format!("document already exists: {path}")));
                }
            }
        }
        for op in batch.ops() {
            match op {
                BatchOp::Set { path, doc, merge } => {
                    let key = path.to_string();
                    let existing = docs.get(&key).cloned();
                    docs.insert(key, Self::merge_doc(existing, doc.clone(), *merge));
                }
                BatchOp::CreateIfAbsent { path, doc } => {
                    docs.insert(path.to_string(), doc.clone());
                }
            }
        }
        Ok(())
    }
}
