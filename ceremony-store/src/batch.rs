use crate::path::Path;
use serde_json::Value;

/// A single write within a [`Batch`]. `Set` with `merge = true` preserves
/// fields of the existing document not present in `doc`; `merge = false`
/// replaces the document wholesale. `CreateIfAbsent` is the one conditional
/// write form
/// the core needs (`CheckParticipantForCeremony`'s first-seen branch) and
/// fails the whole batch if the document already exists.
#[derive(Clone, Debug)]
pub enum BatchOp {
    Set { path: Path, doc: Value, merge: bool },
    CreateIfAbsent { path: Path, doc: Value },
}

/// A set of writes that must commit as a single transaction.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    ops: Vec<BatchOp>,
}

impl Batch {
    pub fn new() -> Self {
        Batch::default()
    }

    pub fn set(mut self, path: Path, doc: Value, merge: bool) -> Self {
        self.ops.push(BatchOp::Set { path, doc, merge });
        self
    }

    pub fn create_if_absent(mut self, path: Path, doc: Value) -> Self {
        self.ops.push(BatchOp::CreateIfAbsent { path, doc });
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
