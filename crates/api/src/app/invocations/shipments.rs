use chrono::{DateTime, Utc};

use cargotrack_core::{Identifier, Record, parse_timestamp};
use cargotrack_infra::{Registry, WorldState};
use cargotrack_shipping::{IndividualParticipant, Shipment, ShipmentCo};

use crate::app::Invocation;
use crate::app::dto::{IdRequest, IdResponse, ShipmentResponse, SubmitShipmentRequest};
use crate::app::errors::InvocationError;
use crate::context::InvocationContext;

use super::parse_id;

/// Submit a shipment from one individual to another, carried by a shipping
/// company.
pub struct SubmitShipment;

/// A shipment submission whose references all resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentPlan {
    shipper: Identifier,
    from: Identifier,
    to: Identifier,
    submitted_at: DateTime<Utc>,
}

impl Invocation for SubmitShipment {
    type Args = SubmitShipmentRequest;
    type Validated = ShipmentPlan;
    type Executed = Identifier;
    type Response = IdResponse;

    fn validate(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        args: Self::Args,
    ) -> Result<Self::Validated, InvocationError> {
        let shipper = resolve::<ShipmentCo>(ctx, state, "shipper", &args.by)?;
        let from = resolve::<IndividualParticipant>(ctx, state, "from", &args.from)?;
        let to = resolve::<IndividualParticipant>(ctx, state, "to", &args.to)?;

        let submitted_at = parse_timestamp("submittedAt", &args.submitted_at)?;
        let now = ctx.now();
        tracing::debug!(%submitted_at, drift = %(now - submitted_at), "parsed submittedAt");
        ctx.submission_policy().check(submitted_at, now)?;

        Ok(ShipmentPlan {
            shipper,
            from,
            to,
            submitted_at,
        })
    }

    fn execute(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        plan: Self::Validated,
    ) -> Result<Self::Executed, InvocationError> {
        let id = Registry::<Shipment>::new(ctx.keyspace()).create(state, |id| {
            Shipment::submitted(id, plan.shipper, plan.from, plan.to, plan.submitted_at)
        })?;
        tracing::info!(id = %id, "shipment submitted");
        Ok(id)
    }

    fn response(id: Self::Executed) -> Self::Response {
        IdResponse { id }
    }
}

/// Resolve a referenced record of type `T`; a malformed or unknown id is an
/// input error naming `field`.
fn resolve<T: Record>(
    ctx: &InvocationContext,
    state: &mut dyn WorldState,
    field: &str,
    raw: &str,
) -> Result<Identifier, InvocationError> {
    let not_found = || InvocationError::validation(format!("Invalid {field} argument: Not found."));

    let id = Identifier::parse(raw).map_err(|_| not_found())?;
    match Registry::<T>::new(ctx.keyspace()).get(state, &id) {
        Ok(_) => Ok(id),
        Err(e) if e.is_not_found() => Err(not_found()),
        Err(e) => Err(e.into()),
    }
}

/// Read a shipment by id.
pub struct GetShipment;

impl Invocation for GetShipment {
    type Args = IdRequest;
    type Validated = Identifier;
    type Executed = Shipment;
    type Response = ShipmentResponse;

    fn validate(
        _ctx: &InvocationContext,
        _state: &mut dyn WorldState,
        args: Self::Args,
    ) -> Result<Self::Validated, InvocationError> {
        parse_id("id", &args.id)
    }

    fn execute(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        id: Self::Validated,
    ) -> Result<Self::Executed, InvocationError> {
        Ok(Registry::<Shipment>::new(ctx.keyspace()).get(state, &id)?)
    }

    fn response(shipment: Self::Executed) -> Self::Response {
        ShipmentResponse { shipment }
    }
}
