// The document store abstraction backing the ceremony core: point
// reads, collection queries filtered by equality/range on one field, and an
// atomic batch of conditional updates/creates. [`MemStore`] is the
// reference implementation; a hosted document database sits behind the
// same [`Store`] trait in production.

mod batch;
mod filter;
mod mem_store;
mod path;
mod store;

pub use batch::{Batch, BatchOp};
pub use filter::Filter;
pub use mem_store::MemStore;
pub use path::Path;
pub use store::Store;
