//! Concurrency-safe registry of live sessions keyed by customer email.
//!
//! Backed by a sharded `DashMap`: lookups take a shard read lock, inserts and
//! removals take the shard write lock. Only membership is protected here;
//! entry internals are guarded by each entry's own turn lock.

use std::sync::Arc;

use dashmap::DashMap;

use super::entry::SessionEntry;

/// Maps a customer identity to its live [`SessionEntry`].
#[derive(Debug)]
pub struct SessionRegistry<K> {
    sessions: DashMap<String, Arc<SessionEntry<K>>>,
}

impl<K> Default for SessionRegistry<K> {
    fn default() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl<K> SessionRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `identity`. Last writer wins; a
    /// replaced entry is dropped from the registry without any cleanup.
    pub fn put(&self, identity: impl Into<String>, entry: Arc<SessionEntry<K>>) {
        self.sessions.insert(identity.into(), entry);
    }

    /// The live entry for `identity`, if any.
    pub fn get(&self, identity: &str) -> Option<Arc<SessionEntry<K>>> {
        self.sessions
            .get(identity)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Remove the entry for `identity`. Removing a missing identity is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&self, identity: &str) -> bool {
        self.sessions.remove(identity).is_some()
    }

    /// Remove the entry for `identity` only if it is still `entry`.
    ///
    /// Failure paths use this so a stale connection never evicts a newer
    /// connection registered under the same identity.
    pub fn evict(&self, identity: &str, entry: &Arc<SessionEntry<K>>) -> bool {
        self.sessions
            .remove_if(identity, |_, current| Arc::ptr_eq(current, entry))
            .is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
