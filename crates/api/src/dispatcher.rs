//! Function routing.
//!
//! The set of operations is closed: [`Function`] names every one of them and
//! [`Function::run`] matches exhaustively, so adding an operation without
//! routing it does not compile.

use std::fmt;
use std::str::FromStr;

use cargotrack_infra::WorldState;

use crate::app::errors::InvocationError;
use crate::app::invocations::{
    GetIndividualParticipant, GetShipment, GetShipmentCo, GetTrackingDataPoint,
    RegisterIndividualParticipant, RegisterShipmentCo, SubmitShipment, TrackShipment,
};
use crate::app::run;
use crate::context::InvocationContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    RegisterIndividualParticipant,
    RegisterShipmentCo,
    SubmitShipment,
    GetIndividualParticipant,
    GetShipmentCo,
    GetShipment,
    TrackShipment,
    GetTrackingDataPoint,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::RegisterIndividualParticipant,
        Function::RegisterShipmentCo,
        Function::SubmitShipment,
        Function::GetIndividualParticipant,
        Function::GetShipmentCo,
        Function::GetShipment,
        Function::TrackShipment,
        Function::GetTrackingDataPoint,
    ];

    /// Name callers invoke the function by.
    pub fn name(self) -> &'static str {
        match self {
            Function::RegisterIndividualParticipant => "registerIndividualParticipant",
            Function::RegisterShipmentCo => "registerShipmentCo",
            Function::SubmitShipment => "submitShipment",
            Function::GetIndividualParticipant => "getIndividualParticipant",
            Function::GetShipmentCo => "getShipmentCo",
            Function::GetShipment => "getShipment",
            Function::TrackShipment => "trackShipment",
            Function::GetTrackingDataPoint => "getTrackingDataPoint",
        }
    }

    fn run(
        self,
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        args: &[String],
    ) -> Result<Vec<u8>, InvocationError> {
        match self {
            Function::RegisterIndividualParticipant => {
                run::<RegisterIndividualParticipant>(ctx, state, args)
            }
            Function::RegisterShipmentCo => run::<RegisterShipmentCo>(ctx, state, args),
            Function::SubmitShipment => run::<SubmitShipment>(ctx, state, args),
            Function::GetIndividualParticipant => run::<GetIndividualParticipant>(ctx, state, args),
            Function::GetShipmentCo => run::<GetShipmentCo>(ctx, state, args),
            Function::GetShipment => run::<GetShipment>(ctx, state, args),
            Function::TrackShipment => run::<TrackShipment>(ctx, state, args),
            Function::GetTrackingDataPoint => run::<GetTrackingDataPoint>(ctx, state, args),
        }
    }
}

impl FromStr for Function {
    type Err = InvocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| InvocationError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Routes an invocation by name and runs it against one unit of work.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: InvocationContext,
}

impl Dispatcher {
    pub fn new(ctx: InvocationContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &InvocationContext {
        &self.ctx
    }

    /// Run `function` with `args`. On success the bytes are the JSON response;
    /// on failure the error's `Display` form is the message for the caller.
    pub fn invoke(
        &self,
        state: &mut dyn WorldState,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, InvocationError> {
        let span = tracing::info_span!(
            "invoke",
            function = %function,
            namespace = %self.ctx.keyspace().namespace()
        );
        let _guard = span.enter();

        let result = function
            .parse::<Function>()
            .and_then(|f| f.run(&self.ctx, state, args));

        match &result {
            Ok(payload) => tracing::info!(bytes = payload.len(), "invocation succeeded"),
            Err(e) => tracing::warn!(class = ?e.class(), error = %e, "invocation rejected"),
        }
        result
    }
}
