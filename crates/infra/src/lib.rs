//! Infrastructure layer: world state access, key space, identifier
//! allocation and typed registries.

pub mod id_allocator;
pub mod keyspace;
pub mod registry;
pub mod world_state;


pub use id_allocator::{AllocError, IdAllocator};
pub use keyspace::{KeyError, KeySpace, ParsedKey};
pub use registry::{Registry, RegistryError};
pub use world_state::{CommitReceipt, InMemoryWorldState, StateError, Transaction, WorldState};
