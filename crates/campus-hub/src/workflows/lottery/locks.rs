use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::domain::RoundId;

/// One mutex per round so draws and entries on the same round serialize
/// while other rounds proceed. Entries live only while someone holds or
/// waits on them.
#[derive(Debug, Default)]
pub(crate) struct RoundLocks {
    locks: Mutex<HashMap<RoundId, Arc<Mutex<()>>>>,
}

impl RoundLocks {
    /// Run `work` while holding the lock for `round_id`.
    pub(crate) fn with_round<T>(&self, round_id: RoundId, work: impl FnOnce() -> T) -> T {
        let handle = self.handle(round_id);
        let result = {
            // Poisoning is ignored: the guarded unit holds no data and
            // storage is re-read after acquisition.
            let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
            work()
        };
        self.release(round_id, &handle);
        result
    }

    fn handle(&self, round_id: RoundId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(round_id).or_default().clone()
    }

    /// Drop the map entry once the map and `handle` are its only owners.
    /// Clones are only taken under the map lock, so the count is stable here.
    fn release(&self, round_id: RoundId, handle: &Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = locks
            .get(&round_id)
            .is_some_and(|stored| Arc::ptr_eq(stored, handle) && Arc::strong_count(handle) == 2);
        if idle {
            locks.remove(&round_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
