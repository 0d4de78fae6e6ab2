//! `cargotrack-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no dispatch).

pub mod entity;
pub mod error;
pub mod id;
pub mod time;

pub use entity::{Entity, Record};
pub use error::{DomainError, DomainResult};
pub use id::Identifier;
pub use time::parse_timestamp;
