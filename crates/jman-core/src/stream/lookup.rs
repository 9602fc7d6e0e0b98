// ── Derived lookups ──
//
// A lookup pairs a collection subscription with a selector. It never
// caches its result: every `get()` runs the selector against whatever
// snapshot the store holds at that moment.

use std::sync::Arc;

use tokio::sync::watch;

use crate::store::Snapshot;

type Selector<T, R> = Arc<dyn Fn(&[Arc<T>]) -> R + Send + Sync>;

/// Reactive view derived from one collection.
///
/// Obtained from `DataStore::site_by_id` and friends. Hold on to it and
/// call [`get`](Self::get) whenever the current value is needed, or await
/// [`changed`](Self::changed) to be woken on the next replacement.
pub struct Lookup<T: Send + Sync + 'static, R> {
    receiver: watch::Receiver<Snapshot<T>>,
    select: Selector<T, R>,
}

impl<T: Send + Sync + 'static, R> Lookup<T, R> {
    pub(crate) fn new<F>(receiver: watch::Receiver<Snapshot<T>>, select: F) -> Self
    where
        F: Fn(&[Arc<T>]) -> R + Send + Sync + 'static,
    {
        Self {
            receiver,
            select: Arc::new(select),
        }
    }

    /// Evaluate against the store's current collection.
    pub fn get(&self) -> R {
        let snap = self.receiver.borrow().clone();
        (self.select)(&snap)
    }

    /// Wait for the collection to be replaced, then return the re-evaluated
    /// result. Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<R> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        Some((self.select)(&snap))
    }
}

impl<T: Send + Sync + 'static, R> Clone for Lookup<T, R> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            select: Arc::clone(&self.select),
        }
    }
}
