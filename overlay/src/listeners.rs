use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    BackdropClick,
    EscapeKey,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    active: HashMap<u64, ListenerKind>,
}

fn lock(table: &Mutex<ListenerTable>) -> MutexGuard<'_, ListenerTable> {
    // The table is plain bookkeeping, a panic mid-update can't leave it inconsistent
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Table of live dismissal listeners. Cloning shares the same table, so a view
/// layer and the controllers it hosts can inspect the same listener set.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    table: Arc<Mutex<ListenerTable>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It stays live until the returned handle is dropped.
    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        let mut table = lock(&self.table);
        let id = table.next_id;
        table.next_id += 1;
        table.active.insert(id, kind);
        tracing::trace!(id, ?kind, "listener subscribed");

        Subscription {
            id,
            kind,
            table: Arc::downgrade(&self.table),
        }
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        lock(&self.table)
            .active
            .values()
            .filter(|&&active| active == kind)
            .count()
    }

    pub fn total(&self) -> usize {
        lock(&self.table).active.len()
    }
}

/// Handle for one live listener; dropping it unregisters the listener.
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    table: Weak<Mutex<ListenerTable>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            lock(&table).active.remove(&self.id);
            tracing::trace!(id = self.id, kind = ?self.kind, "listener released");
        }
    }
}
