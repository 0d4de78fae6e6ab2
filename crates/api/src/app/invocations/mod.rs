//! Operations, one file per domain area.

use cargotrack_core::Identifier;

use crate::app::errors::InvocationError;

pub mod participants;
pub mod shipments;
pub mod tracking;

pub use participants::{
    GetIndividualParticipant, GetParticipant, GetShipmentCo, RegisterIndividualParticipant,
    RegisterParticipant, RegisterShipmentCo,
};
pub use shipments::{GetShipment, ShipmentPlan, SubmitShipment};
pub use tracking::{GetTrackingDataPoint, TrackShipment};

/// Shape-check a caller-supplied identifier, naming `field` on failure.
pub(crate) fn parse_id(field: &str, raw: &str) -> Result<Identifier, InvocationError> {
    Identifier::parse(raw).map_err(|e| {
        InvocationError::validation(format!("invalid {field} argument: {e}"))
    })
}
