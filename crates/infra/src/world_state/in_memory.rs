use std::collections::BTreeMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::r#trait::{StateError, WorldState};

#[derive(Debug, Clone)]
struct VersionedValue {
    /// Commit height that last wrote this key.
    version: u64,
    value: Vec<u8>,
}

#[derive(Debug, Default)]
struct Committed {
    entries: BTreeMap<String, VersionedValue>,
    height: u64,
}

/// In-memory, versioned world state with optimistic units of work.
///
/// Intended for tests, local hosting and benchmarks.
///
/// Every unit of work runs in a [`Transaction`] that records the version of
/// each key it reads and buffers its writes. [`Transaction::commit`] applies
/// the writes atomically only if none of the keys it read has been written by
/// another transaction in the meantime; otherwise the whole unit of work is
/// rejected with [`StateError::Conflict`] and nothing it wrote survives. This
/// is what keeps unguarded read-modify-write sequences (identifier counters)
/// unique under concurrent writers.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    inner: RwLock<Committed>,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub tx_id: Uuid,
    /// Commit height assigned to this transaction (1-based, gap-free).
    pub height: u64,
    pub keys_written: usize,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new unit of work against the current committed state.
    pub fn begin(&self) -> Transaction<'_> {
        Transaction {
            store: self,
            tx_id: Uuid::now_v7(),
            reads: BTreeMap::new(),
            writes: BTreeMap::new(),
        }
    }

    /// Read a committed value outside any unit of work.
    pub fn get_committed(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        let inner = self.read_lock()?;
        Ok(inner.entries.get(key).map(|v| v.value.clone()))
    }

    /// All committed keys in lexical order.
    pub fn committed_keys(&self) -> Result<Vec<String>, StateError> {
        let inner = self.read_lock()?;
        Ok(inner.entries.keys().cloned().collect())
    }

    /// Number of committed transactions so far.
    pub fn height(&self) -> Result<u64, StateError> {
        Ok(self.read_lock()?.height)
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, Committed>, StateError> {
        self.inner
            .read()
            .map_err(|_| StateError::Unavailable("lock poisoned".to_string()))
    }

    fn committed_version(&self, key: &str) -> Result<(u64, Option<Vec<u8>>), StateError> {
        let inner = self.read_lock()?;
        Ok(match inner.entries.get(key) {
            Some(v) => (v.version, Some(v.value.clone())),
            None => (0, None),
        })
    }
}

/// One unit of work against an [`InMemoryWorldState`].
///
/// Reads observe committed state plus this transaction's own pending writes.
/// Dropping a transaction without committing aborts it.
#[derive(Debug)]
pub struct Transaction<'a> {
    store: &'a InMemoryWorldState,
    tx_id: Uuid,
    /// Version of each committed key at first read (0 = absent).
    reads: BTreeMap<String, u64>,
    writes: BTreeMap<String, Vec<u8>>,
}

impl Transaction<'_> {
    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    /// Keys written so far by this unit of work.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Validate the read set and publish all buffered writes atomically.
    pub fn commit(self) -> Result<CommitReceipt, StateError> {
        let mut inner = self
            .store
            .inner
            .write()
            .map_err(|_| StateError::Unavailable("lock poisoned".to_string()))?;

        for (key, expected) in &self.reads {
            let found = inner.entries.get(key).map(|v| v.version).unwrap_or(0);
            if found != *expected {
                tracing::warn!(tx_id = %self.tx_id, key = %key, expected, found, "read conflict; aborting");
                return Err(StateError::Conflict {
                    key: key.clone(),
                    expected: *expected,
                    found,
                });
            }
        }

        inner.height += 1;
        let height = inner.height;
        let keys_written = self.writes.len();
        for (key, value) in self.writes {
            inner
                .entries
                .insert(key, VersionedValue { version: height, value });
        }

        tracing::debug!(tx_id = %self.tx_id, height, keys_written, "committed");
        Ok(CommitReceipt {
            tx_id: self.tx_id,
            height,
            keys_written,
        })
    }

    /// Discard all buffered writes.
    pub fn abort(self) {
        tracing::debug!(tx_id = %self.tx_id, discarded = self.writes.len(), "aborted");
    }
}

impl WorldState for Transaction<'_> {
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(Some(pending.clone()));
        }
        let (version, value) = self.store.committed_version(key)?;
        self.reads.entry(key.to_string()).or_insert(version);
        Ok(value)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        self.writes.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_invisible_until_commit() {
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        tx.put_state("k", b"v".to_vec()).unwrap();

        assert_eq!(tx.get_state("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.get_committed("k").unwrap(), None);

        let receipt = tx.commit().unwrap();
        assert_eq!(receipt.height, 1);
        assert_eq!(receipt.keys_written, 1);
        assert_eq!(store.get_committed("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn dropped_transaction_leaves_no_trace() {
        let store = InMemoryWorldState::new();
        {
            let mut tx = store.begin();
            tx.put_state("k", b"v".to_vec()).unwrap();
        }
        let mut tx = store.begin();
        tx.put_state("other", b"v".to_vec()).unwrap();
        tx.abort();

        assert!(store.committed_keys().unwrap().is_empty());
        assert_eq!(store.height().unwrap(), 0);
    }

    #[test]
    fn concurrent_read_modify_write_on_same_key_conflicts() {
        let store = InMemoryWorldState::new();
        let mut a = store.begin();
        let mut b = store.begin();

        assert_eq!(a.get_state("counter").unwrap(), None);
        assert_eq!(b.get_state("counter").unwrap(), None);
        a.put_state("counter", b"1".to_vec()).unwrap();
        b.put_state("counter", b"1".to_vec()).unwrap();

        a.commit().unwrap();
        match b.commit().unwrap_err() {
            StateError::Conflict { key, expected, found } => {
                assert_eq!(key, "counter");
                assert_eq!(expected, 0);
                assert_eq!(found, 1);
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
        assert_eq!(store.height().unwrap(), 1);
    }

    #[test]
    fn disjoint_transactions_both_commit() {
        let store = InMemoryWorldState::new();
        let mut a = store.begin();
        let mut b = store.begin();
        a.get_state("a").unwrap();
        b.get_state("b").unwrap();
        a.put_state("a", b"1".to_vec()).unwrap();
        b.put_state("b", b"1".to_vec()).unwrap();

        assert!(a.commit().is_ok());
        assert!(b.commit().is_ok());
        assert_eq!(store.committed_keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
