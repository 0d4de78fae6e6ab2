//! Monotonic identifier allocation.
//!
//! Each `(namespace, typeName)` pair owns a counter record holding the last
//! issued sequence number as a decimal string. Allocation is a plain
//! read-modify-write through the unit of work's [`WorldState`]: no lock, no
//! compare-and-swap, no retry. Uniqueness under concurrent writers comes from
//! the host rejecting a unit of work whose read of the counter went stale.

use thiserror::Error;

use cargotrack_core::Identifier;

use crate::keyspace::{KeyError, KeySpace};
use crate::world_state::{StateError, WorldState};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("counter at '{key}' holds a non-decimal value")]
    CorruptCounter { key: String },

    #[error("counter at '{key}' is exhausted")]
    Exhausted { key: String },
}

/// Hands out strictly increasing identifiers per type name.
#[derive(Debug, Clone, Copy)]
pub struct IdAllocator<'k> {
    keyspace: &'k KeySpace,
}

impl<'k> IdAllocator<'k> {
    pub fn new(keyspace: &'k KeySpace) -> Self {
        Self { keyspace }
    }

    /// Advance the counter of `type_name` and return the new identifier.
    pub fn next(&self, state: &mut dyn WorldState, type_name: &str) -> Result<Identifier, AllocError> {
        let key = self.keyspace.counter_key(type_name)?;
        let last = self.current_at(state, &key)?;
        let next = last
            .checked_add(1)
            .ok_or_else(|| AllocError::Exhausted { key: key.clone() })?;

        state.put_state(&key, next.to_string().into_bytes())?;
        tracing::debug!(key = %key, sequence = next, "allocated identifier");

        Ok(Identifier::from_sequence(next))
    }

    /// Last issued sequence number of `type_name` (0 if none yet).
    pub fn current(&self, state: &mut dyn WorldState, type_name: &str) -> Result<u64, AllocError> {
        let key = self.keyspace.counter_key(type_name)?;
        self.current_at(state, &key)
    }

    fn current_at(&self, state: &mut dyn WorldState, key: &str) -> Result<u64, AllocError> {
        match state.get_state(key)? {
            None => Ok(0),
            Some(bytes) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| AllocError::CorruptCounter {
                    key: key.to_string(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_state::InMemoryWorldState;
    use proptest::prelude::*;

    fn keyspace() -> KeySpace {
        KeySpace::new("test.ns").unwrap()
    }

    #[test]
    fn first_identifier_is_one() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let id = IdAllocator::new(&ks).next(&mut tx, "X").unwrap();
        assert_eq!(id.as_str(), "0000000001");
        assert_eq!(tx.get_state("test.ns.X.index").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn counters_are_independent_per_type() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let alloc = IdAllocator::new(&ks);
        alloc.next(&mut tx, "A").unwrap();
        alloc.next(&mut tx, "A").unwrap();
        assert_eq!(alloc.next(&mut tx, "B").unwrap().as_str(), "0000000001");
        assert_eq!(alloc.current(&mut tx, "A").unwrap(), 2);
    }

    #[test]
    fn corrupt_counter_is_an_error() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        tx.put_state("test.ns.X.index", b"twelve".to_vec()).unwrap();
        let err = IdAllocator::new(&ks).next(&mut tx, "X").unwrap_err();
        assert!(matches!(err, AllocError::CorruptCounter { .. }));
    }

    #[test]
    fn exhausted_counter_is_an_error() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        tx.put_state("test.ns.X.index", u64::MAX.to_string().into_bytes())
            .unwrap();
        let err = IdAllocator::new(&ks).next(&mut tx, "X").unwrap_err();
        assert!(matches!(err, AllocError::Exhausted { .. }));
    }

    #[test]
    fn type_name_with_separator_is_rejected() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let err = IdAllocator::new(&ks).next(&mut tx, "X#1").unwrap_err();
        assert!(matches!(err, AllocError::Key(KeyError::ReservedSeparator { .. })));
    }

    #[test]
    fn racing_allocations_cannot_both_commit() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let alloc = IdAllocator::new(&ks);

        let mut a = store.begin();
        let mut b = store.begin();
        let id_a = alloc.next(&mut a, "X").unwrap();
        let id_b = alloc.next(&mut b, "X").unwrap();
        // Both observed the same prior value...
        assert_eq!(id_a, id_b);

        // ...but only the first to commit wins.
        a.commit().unwrap();
        assert!(matches!(b.commit(), Err(StateError::Conflict { .. })));

        let mut c = store.begin();
        assert_eq!(alloc.next(&mut c, "X").unwrap().as_str(), "0000000002");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: N serialized allocations yield 1..=N, zero-padded, in order.
        #[test]
        fn serialized_allocations_are_gap_free(n in 1usize..200, per_tx in 1usize..8) {
            let ks = keyspace();
            let store = InMemoryWorldState::new();
            let alloc = IdAllocator::new(&ks);

            let mut issued = Vec::with_capacity(n);
            while issued.len() < n {
                let mut tx = store.begin();
                for _ in 0..per_tx.min(n - issued.len()) {
                    issued.push(alloc.next(&mut tx, "X").unwrap());
                }
                tx.commit().unwrap();
            }

            for (i, id) in issued.iter().enumerate() {
                prop_assert_eq!(id.as_str(), format!("{:010}", i + 1));
            }
        }
    }
}
