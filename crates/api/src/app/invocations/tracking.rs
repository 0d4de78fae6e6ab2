use cargotrack_core::{Identifier, parse_timestamp};
use cargotrack_infra::{Registry, WorldState};
use cargotrack_shipping::{Shipment, TrackingDataPoint, TrackingReading};

use crate::app::Invocation;
use crate::app::dto::{Ack, TrackShipmentRequest, TrackingDataPointRequest, TrackingDataPointResponse};
use crate::app::errors::InvocationError;
use crate::context::InvocationContext;

use super::parse_id;

fn tracking_registry<'k>(
    ctx: &'k InvocationContext,
    shipment_id: &Identifier,
) -> Registry<'k, TrackingDataPoint> {
    Registry::scoped(ctx.keyspace(), TrackingDataPoint::type_name_for(shipment_id))
}

/// Append a sensor reading to a shipment's tracking sequence.
pub struct TrackShipment;

impl Invocation for TrackShipment {
    type Args = TrackShipmentRequest;
    type Validated = (Identifier, TrackingReading);
    type Executed = Identifier;
    type Response = Ack;

    fn validate(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        args: Self::Args,
    ) -> Result<Self::Validated, InvocationError> {
        let at = parse_timestamp("at", &args.at)?;
        let reading = TrackingReading::new(at, args.lat, args.lng, args.temp, args.hum)?;

        let unknown = || InvocationError::validation("unable to locate shipment for this ID");
        let shipment_id = Identifier::parse(&args.id).map_err(|_| unknown())?;
        match Registry::<Shipment>::new(ctx.keyspace()).get(state, &shipment_id) {
            Ok(_) => Ok((shipment_id, reading)),
            Err(e) if e.is_not_found() => Err(unknown()),
            Err(e) => Err(e.into()),
        }
    }

    fn execute(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        (shipment_id, reading): Self::Validated,
    ) -> Result<Self::Executed, InvocationError> {
        let registry = tracking_registry(ctx, &shipment_id);
        let id = registry.create(state, |_| TrackingDataPoint::new(shipment_id.clone(), reading))?;
        tracing::info!(shipment_id = %shipment_id, id = %id, "tracked");
        Ok(id)
    }

    fn response(_id: Self::Executed) -> Self::Response {
        Ack {}
    }
}

/// Read one tracking data point of a shipment.
pub struct GetTrackingDataPoint;

impl Invocation for GetTrackingDataPoint {
    type Args = TrackingDataPointRequest;
    type Validated = (Identifier, Identifier);
    type Executed = TrackingDataPoint;
    type Response = TrackingDataPointResponse;

    fn validate(
        _ctx: &InvocationContext,
        _state: &mut dyn WorldState,
        args: Self::Args,
    ) -> Result<Self::Validated, InvocationError> {
        Ok((
            parse_id("shipmentId", &args.shipment_id)?,
            parse_id("id", &args.id)?,
        ))
    }

    fn execute(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        (shipment_id, id): Self::Validated,
    ) -> Result<Self::Executed, InvocationError> {
        Ok(tracking_registry(ctx, &shipment_id).get(state, &id)?)
    }

    fn response(tracking_data_point: Self::Executed) -> Self::Response {
        TrackingDataPointResponse { tracking_data_point }
    }
}
