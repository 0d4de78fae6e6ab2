//! Capabilities shared by everything stored in the world state.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::id::Identifier;

/// Entity marker + minimal interface: a record with its own identity.
pub trait Entity {
    /// Returns the entity identifier.
    fn id(&self) -> &Identifier;
}

/// A value that can be stored through a typed registry.
///
/// `TYPE_NAME` is the type segment of the composite key and the name of the
/// counter the registry allocates identifiers from. It must not contain the
/// key separators `.` or `#`.
pub trait Record: Serialize + DeserializeOwned {
    const TYPE_NAME: &'static str;
}
