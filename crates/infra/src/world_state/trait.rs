use thiserror::Error;

/// World state operation error.
///
/// These are **infrastructure errors** (storage, isolation) as opposed to
/// domain errors (validation, invariants).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Reading a key failed.
    #[error("read failed for key '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Writing a key failed.
    #[error("write failed for key '{key}': {reason}")]
    Write { key: String, reason: String },

    /// A key read by this unit of work was changed by another unit of work
    /// that committed first.
    #[error("read conflict on key '{key}': expected version {expected}, found {found}")]
    Conflict {
        key: String,
        expected: u64,
        found: u64,
    },

    /// The backing store is no longer usable (e.g. a poisoned lock).
    #[error("world state unavailable: {0}")]
    Unavailable(String),
}

/// Key-value access for one unit of work.
///
/// This is the only storage surface the registry and allocator see. Keys are
/// opaque strings produced by [`crate::KeySpace`]; values are the canonical
/// encoding of a record.
///
/// ## Isolation
///
/// Implementations hand out access scoped to exactly one invocation. The
/// identifier allocator performs an unguarded read-modify-write through this
/// interface, so the host must guarantee that two units of work touching the
/// same key cannot both commit (see [`crate::InMemoryWorldState`]).
pub trait WorldState {
    /// Read a key, `None` if no value has ever been written.
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Write (insert or replace) a key.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;
}

impl<S> WorldState for &mut S
where
    S: WorldState + ?Sized,
{
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        (**self).put_state(key, value)
    }
}
