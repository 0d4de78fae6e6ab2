use std::marker::PhantomData;

use cargotrack_core::Identifier;
use cargotrack_infra::{Registry, WorldState};
use cargotrack_shipping::{IndividualParticipant, ParticipantDetails, ParticipantRecord, ShipmentCo};

use crate::app::Invocation;
use crate::app::dto::{IdRequest, IdResponse, ParticipantResponse, RegisterParticipantRequest};
use crate::app::errors::InvocationError;
use crate::context::InvocationContext;

use super::parse_id;

/// Register a participant of kind `P` under a freshly allocated id.
pub struct RegisterParticipant<P>(PhantomData<fn() -> P>);

pub type RegisterIndividualParticipant = RegisterParticipant<IndividualParticipant>;
pub type RegisterShipmentCo = RegisterParticipant<ShipmentCo>;

impl<P: ParticipantRecord> Invocation for RegisterParticipant<P> {
    type Args = RegisterParticipantRequest;
    type Validated = ParticipantDetails;
    type Executed = Identifier;
    type Response = IdResponse;

    fn validate(
        _ctx: &InvocationContext,
        _state: &mut dyn WorldState,
        args: Self::Args,
    ) -> Result<Self::Validated, InvocationError> {
        Ok(ParticipantDetails::new(args.name, args.address)?)
    }

    fn execute(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        details: Self::Validated,
    ) -> Result<Self::Executed, InvocationError> {
        let id = Registry::<P>::new(ctx.keyspace())
            .create(state, |id| P::from_details(id, details))?;
        tracing::info!(type_name = P::TYPE_NAME, id = %id, "participant registered");
        Ok(id)
    }

    fn response(id: Self::Executed) -> Self::Response {
        IdResponse { id }
    }
}

/// Read a participant of kind `P` by id.
pub struct GetParticipant<P>(PhantomData<fn() -> P>);

pub type GetIndividualParticipant = GetParticipant<IndividualParticipant>;
pub type GetShipmentCo = GetParticipant<ShipmentCo>;

impl<P: ParticipantRecord> Invocation for GetParticipant<P> {
    type Args = IdRequest;
    type Validated = Identifier;
    type Executed = P;
    type Response = ParticipantResponse<P>;

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
        Ok(Registry::<P>::new(ctx.keyspace()).get(state, &id)?)
    }

    fn response(participant: Self::Executed) -> Self::Response {
        ParticipantResponse { participant }
    }
}
