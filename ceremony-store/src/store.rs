use crate::batch::Batch;
use crate::filter::Filter;
use crate::path::Path;
use ceremony_base::Result;
use serde_json::Value;

/// The document store abstraction. A minimal interface: point reads,
/// collection queries by equality/range on one field, and an atomic batch
/// of conditional updates/creates. Every mutation that touches more than
/// one document goes through [`Store::commit_batch`]; single-document
/// non-batched writes exist only for the narrow idempotent-merge cases
/// the contract calls out explicitly.
pub trait Store: Send + Sync {
    fn get(&self, path: &Path) -> Result<Option<Value>>;

    fn set(&self, path: &Path, doc: Value, merge: bool) -> Result<()>;

    fn query(&self, collection: &Path, filters: &[Filter]) -> Result<Vec<(Path, Value)>>;

    fn commit_batch(&self, batch: Batch) -> Result<()>;
}
