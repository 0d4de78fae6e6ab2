//! Typed registries over the flat world state.
//!
//! A [`Registry<T>`] binds one record type to a type segment of the key space
//! and to the identifier counter of that segment. It only creates and reads:
//! records are immutable once written, and nothing is ever deleted.
//!
//! ```text
//! create(build)                      get(id)
//!   ↓                                  ↓
//! IdAllocator::next(type_name)       KeySpace::entity_key(type_name, id)
//!   ↓                                  ↓
//! build(id) -> T                     WorldState::get_state
//!   ↓                                  ↓ (absent -> NotFound)
//! serde_json::to_vec(T)              serde_json::from_slice::<T>
//!   ↓
//! WorldState::put_state(entity_key)
//! ```

use std::marker::PhantomData;

use thiserror::Error;

use cargotrack_core::{Identifier, Record};

use crate::id_allocator::{AllocError, IdAllocator};
use crate::keyspace::{KeyError, KeySpace};
use crate::world_state::{StateError, WorldState};

/// Registry operation error.
///
/// `NotFound` is deliberately separate from `State` and `Decode`: callers
/// branch on "does not exist" versus "the system is broken".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{type_name} '{id}' not found")]
    NotFound { type_name: String, id: String },

    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    #[error("identifier allocation failed: {0}")]
    Allocation(#[from] AllocError),

    #[error("world state access failed: {0}")]
    State(#[from] StateError),

    #[error("failed to encode {type_name}: {reason}")]
    Encode { type_name: String, reason: String },

    #[error("failed to decode {type_name} at '{key}': {reason}")]
    Decode {
        type_name: String,
        key: String,
        reason: String,
    },
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }
}

/// Create/get access to the records of one type.
#[derive(Debug)]
pub struct Registry<'k, T> {
    keyspace: &'k KeySpace,
    type_name: String,
    _record: PhantomData<fn() -> T>,
}

impl<'k, T: Record> Registry<'k, T> {
    /// Registry under the record's own type name.
    pub fn new(keyspace: &'k KeySpace) -> Self {
        Self::scoped(keyspace, T::TYPE_NAME)
    }

    /// Registry under an explicit type name, giving `T` an independent
    /// sequence (e.g. one tracking sequence per shipment).
    pub fn scoped(keyspace: &'k KeySpace, type_name: impl Into<String>) -> Self {
        Self {
            keyspace,
            type_name: type_name.into(),
            _record: PhantomData,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Composite key of the record `id`.
    pub fn key(&self, id: &Identifier) -> Result<String, RegistryError> {
        Ok(self.keyspace.entity_key(&self.type_name, id.as_str())?)
    }

    /// Allocate an identifier, build the record around it and store it.
    ///
    /// The builder receives the allocated identifier so the record carries its
    /// own identity before it is encoded.
    pub fn create<F>(&self, state: &mut dyn WorldState, build: F) -> Result<Identifier, RegistryError>
    where
        F: FnOnce(Identifier) -> T,
    {
        let id = IdAllocator::new(self.keyspace).next(state, &self.type_name)?;
        let key = self.key(&id)?;

        let item = build(id.clone());
        let data = serde_json::to_vec(&item).map_err(|e| RegistryError::Encode {
            type_name: self.type_name.clone(),
            reason: e.to_string(),
        })?;

        state.put_state(&key, data)?;
        tracing::debug!(key = %key, type_name = %self.type_name, "record created");

        Ok(id)
    }

    /// Read and decode the record `id`.
    pub fn get(&self, state: &mut dyn WorldState, id: &Identifier) -> Result<T, RegistryError> {
        let key = self.key(id)?;
        let Some(data) = state.get_state(&key)? else {
            tracing::debug!(key = %key, "nothing found for key");
            return Err(RegistryError::NotFound {
                type_name: self.type_name.clone(),
                id: id.to_string(),
            });
        };

        let item = serde_json::from_slice(&data).map_err(|e| RegistryError::Decode {
            type_name: self.type_name.clone(),
            key: key.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(key = %key, "record found");

        Ok(item)
    }

    /// Whether a record `id` exists, without decoding it.
    pub fn exists(&self, state: &mut dyn WorldState, id: &Identifier) -> Result<bool, RegistryError> {
        let key = self.key(id)?;
        Ok(state.get_state(&key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_state::InMemoryWorldState;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Pallet {
        id: Identifier,
        label: String,
    }

    impl Record for Pallet {
        const TYPE_NAME: &'static str = "Pallet";
    }

    fn keyspace() -> KeySpace {
        KeySpace::new("test.ns").unwrap()
    }

    fn pallet_with(label: &str) -> impl FnOnce(Identifier) -> Pallet + '_ {
        move |id| Pallet {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn create_embeds_id_and_writes_under_entity_key() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let registry = Registry::<Pallet>::new(&ks);

        let id = registry.create(&mut tx, pallet_with("bananas")).unwrap();
        assert_eq!(id.as_str(), "0000000001");
        tx.commit().unwrap();

        let raw = store.get_committed("test.ns.Pallet#0000000001").unwrap().unwrap();
        let stored: Pallet = serde_json::from_slice(&raw).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.label, "bananas");
        assert_eq!(store.get_committed("test.ns.Pallet.index").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn get_returns_what_create_stored() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let registry = Registry::<Pallet>::new(&ks);

        let first = registry.create(&mut tx, pallet_with("a")).unwrap();
        let second = registry.create(&mut tx, pallet_with("b")).unwrap();
        assert_ne!(first, second);

        assert_eq!(registry.get(&mut tx, &second).unwrap().label, "b");
        assert_eq!(registry.get(&mut tx, &first).unwrap().label, "a");
    }

    #[test]
    fn get_of_unknown_id_is_not_found() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let registry = Registry::<Pallet>::new(&ks);

        let err = registry
            .get(&mut tx, &Identifier::from_sequence(9))
            .unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
        assert!(!registry.exists(&mut tx, &Identifier::from_sequence(9)).unwrap());
    }

    #[test]
    fn undecodable_record_is_a_decode_error() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        tx.put_state("test.ns.Pallet#0000000001", b"{not json".to_vec())
            .unwrap();

        let err = Registry::<Pallet>::new(&ks)
            .get(&mut tx, &Identifier::from_sequence(1))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn scoped_registries_keep_separate_sequences() {
        let ks = keyspace();
        let store = InMemoryWorldState::new();
        let mut tx = store.begin();
        let left = Registry::<Pallet>::scoped(&ks, "Pallet[0000000001]");
        let right = Registry::<Pallet>::scoped(&ks, "Pallet[0000000002]");

        left.create(&mut tx, pallet_with("l1")).unwrap();
        left.create(&mut tx, pallet_with("l2")).unwrap();
        let r1 = right.create(&mut tx, pallet_with("r1")).unwrap();

        assert_eq!(r1.as_str(), "0000000001");
        assert_eq!(right.get(&mut tx, &r1).unwrap().label, "r1");
        assert_eq!(left.get(&mut tx, &r1).unwrap().label, "l1");
        assert!(Registry::<Pallet>::new(&ks).get(&mut tx, &r1).unwrap_err().is_not_found());
    }
}
