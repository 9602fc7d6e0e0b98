// ── Reactive data store ──
//
// Ordered entity snapshots with push-based change notification.

mod collection;
mod data_store;
mod refresh;
mod status;

pub use collection::Snapshot;
pub use data_store::DataStore;
pub(crate) use refresh::{DataSnapshot, LoadingGuard, SnapshotSource};
pub use status::LoadStatus;
