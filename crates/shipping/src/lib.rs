//! Shipping domain module (participants, shipments, tracking data).
//!
//! This crate contains the records stored in the world state, implemented
//! purely as deterministic domain logic (no IO, no storage, no dispatch).

pub mod participant;
pub mod shipment;
pub mod tracking;

pub use participant::{
    IndividualParticipant, Participant, ParticipantDetails, ParticipantRecord, ShipmentCo,
};
pub use shipment::{Asset, Shipment, ShipmentStatus};
pub use tracking::{TRACKING_TYPE_NAME, TrackingDataPoint, TrackingReading};
