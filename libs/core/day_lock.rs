use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of in-flight coordination keys. One mutex per
/// `(creator, day key)` pair serializes saves targeting the same container;
/// entries only live while at least one operation holds or awaits the key.
#[derive(Default)]
pub struct DayLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

pub struct DayLockGuard<'a> {
    key: String,
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl DayLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub async fn acquire(&self, creator_id: &str, day_key: &str) -> DayLockGuard<'_> {
        let key = format!("{creator_id}/{day_key}");
        let cell = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = cell.lock_owned().await;

        DayLockGuard {
            key,
            locks: &self.locks,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for DayLockGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // A single owner left means nobody waits on this key (only the map
        // entry itself). Waiters hold their own clone, so the entry survives
        // while any of them is queued.
        self.locks
            .remove_if(&self.key, |_, cell| Arc::strong_count(cell) == 1);
    }
}
