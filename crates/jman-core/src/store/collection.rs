// ── Generic reactive entity collection ──
//
// Ordered snapshot storage with push-based change notification via
// `watch` channels. Collections are only ever replaced wholesale.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared, ordered snapshot of one collection.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A reactive, ordered collection for a single entity type.
///
/// Readers get cheap `Arc` snapshots; every replacement is broadcast to
/// subscribers, so derived views can re-evaluate without polling.
pub(crate) struct EntityCollection<T: Send + Sync + 'static> {
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the whole collection, preserving the incoming order.
    pub(crate) fn replace(&self, items: Vec<T>) {
        let values: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    /// First entity matching `pred`, in collection order.
    pub(crate) fn find(&self, pred: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.snapshot.borrow().iter().find(|e| pred(e)).cloned()
    }

    /// Every entity matching `pred`, in collection order.
    pub(crate) fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<Arc<T>> {
        self.snapshot
            .borrow()
            .iter()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }
}
