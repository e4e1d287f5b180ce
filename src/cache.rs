use alloc::{collections::BTreeMap, sync::Arc};
use parking_lot::Mutex;

use crate::{errors::ResolveErrorKind, identity::Identity, provider::Value};

/// Resolution state of one identity within the current epoch.
///
/// Transitions are monotonic until a reset: `Unresolved -> InProgress ->
/// {Resolved | Failed}`. A reset returns the entry to `Unresolved` and
/// starts a new epoch.
pub(crate) enum ResolutionState {
    Unresolved,
    InProgress,
    Resolved(Value),
    Failed(ResolveErrorKind),
}

pub(crate) struct CacheEntry {
    pub(crate) state: ResolutionState,
    pub(crate) epoch: u64,
}

impl CacheEntry {
    #[inline]
    #[must_use]
    const fn new() -> Self {
        Self {
            state: ResolutionState::Unresolved,
            epoch: 0,
        }
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.state = ResolutionState::Unresolved;
        self.epoch += 1;
    }
}

/// Identity-keyed store of resolution state, independent of the registry's
/// provider definitions.
///
/// Each entry carries its own lock. The resolver holds an entry's lock for
/// the whole `InProgress` window of that identity, so concurrent callers of
/// the same identity block until the terminal transition while unrelated
/// identities proceed independently.
///
/// Lock order: the map lock is never held while an entry lock is acquired.
pub(crate) struct Cache {
    entries: Mutex<BTreeMap<Identity, Arc<Mutex<CacheEntry>>>>,
}

impl Cache {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the entry for `id`, creating it in `Unresolved` state on
    /// first use.
    #[must_use]
    pub(crate) fn entry(&self, id: &Identity) -> Arc<Mutex<CacheEntry>> {
        self.entries
            .lock()
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(CacheEntry::new())))
            .clone()
    }

    /// Clears the entry for `id` back to `Unresolved`, starting a new epoch.
    ///
    /// Callers must ensure no resolution for `id` is in flight; a reset
    /// issued concurrently blocks until the in-flight construction finishes
    /// and then discards its result.
    pub(crate) fn reset(&self, id: &Identity) {
        let entry = self.entries.lock().get(id).cloned();
        if let Some(entry) = entry {
            entry.lock().reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cache, ResolutionState};
    use crate::identity::Identity;

    use alloc::sync::Arc;

    #[test]
    fn test_entry_created_unresolved() {
        let cache = Cache::new();
        let id = Identity::from("db");

        let entry = cache.entry(&id);
        let guard = entry.lock();

        assert!(matches!(guard.state, ResolutionState::Unresolved));
        assert_eq!(guard.epoch, 0);
    }

    #[test]
    fn test_entry_is_shared_per_identity() {
        let cache = Cache::new();
        let id = Identity::from("db");

        let first = cache.entry(&id);
        let second = cache.entry(&id);

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_reset_starts_new_epoch() {
        let cache = Cache::new();
        let id = Identity::from("db");

        {
            let entry = cache.entry(&id);
            entry.lock().state = ResolutionState::Resolved(Arc::new(1i32));
        }
        cache.reset(&id);

        let entry = cache.entry(&id);
        let guard = entry.lock();
        assert!(matches!(guard.state, ResolutionState::Unresolved));
        assert_eq!(guard.epoch, 1);
    }

    #[test]
    fn test_reset_unknown_identity_is_noop() {
        let cache = Cache::new();

        cache.reset(&Identity::from("missing"));
    }
}
