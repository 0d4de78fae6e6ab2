//! Invocation pipeline.
//!
//! This folder is structured like:
//! - `invocations/`: one file per domain area, each operation an [`Invocation`]
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the caller-visible error model
//!
//! Every operation runs the same three phases:
//!
//! ```text
//! [json arg]
//!   ↓ decode_args
//! Args ──validate──→ Validated ──execute──→ Executed ──response──→ Response
//!   (reads only)        (writes)                 ↓
//!                                         serde_json::to_vec
//! ```
//!
//! The associated types make it impossible to execute unvalidated input, and
//! any phase failing short-circuits the rest.

use serde::Serialize;
use serde::de::DeserializeOwned;

use cargotrack_infra::WorldState;

use crate::context::InvocationContext;

pub mod dto;
pub mod errors;
pub mod invocations;

use errors::InvocationError;

pub trait Invocation {
    type Args: DeserializeOwned;
    type Validated;
    type Executed;
    type Response: Serialize;

    /// Decode-level and referential checks. Must not write.
    fn validate(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        args: Self::Args,
    ) -> Result<Self::Validated, InvocationError>;

    fn execute(
        ctx: &InvocationContext,
        state: &mut dyn WorldState,
        validated: Self::Validated,
    ) -> Result<Self::Executed, InvocationError>;

    fn response(executed: Self::Executed) -> Self::Response;
}

/// Run all phases of `I` and encode its response.
pub fn run<I: Invocation>(
    ctx: &InvocationContext,
    state: &mut dyn WorldState,
    args: &[String],
) -> Result<Vec<u8>, InvocationError> {
    let args = decode_args::<I::Args>(args)?;
    let validated = I::validate(ctx, state, args)?;
    let executed = I::execute(ctx, state, validated)?;

    serde_json::to_vec(&I::response(executed))
        .map_err(|e| InvocationError::internal(format!("failed to encode response: {e}")))
}

/// Decode the single JSON argument of an invocation.
pub fn decode_args<A: DeserializeOwned>(args: &[String]) -> Result<A, InvocationError> {
    let [raw] = args else {
        return Err(InvocationError::MalformedInput(
            "expecting JSON input as first param".to_string(),
        ));
    };

    serde_json::from_str(raw).map_err(|e| {
        tracing::debug!(error = %e, "error unmarshaling JSON");
        InvocationError::MalformedInput("Invalid JSON".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dto::IdRequest;

    #[test]
    fn exactly_one_argument_is_required() {
        for args in [vec![], vec![r#"{"id":"0001"}"#.to_string(), "{}".to_string()]] {
            let err = decode_args::<IdRequest>(&args).unwrap_err();
            assert_eq!(err.to_string(), "expecting JSON input as first param");
        }
    }

    #[test]
    fn undecodable_argument_is_invalid_json() {
        for raw in ["{not json", r#"{"identifier":"0001"}"#, r#"{"id":1}"#] {
            let err = decode_args::<IdRequest>(&[raw.to_string()]).unwrap_err();
            assert_eq!(err, InvocationError::MalformedInput("Invalid JSON".to_string()));
        }
    }

    #[test]
    fn decodes_the_single_argument() {
        let req = decode_args::<IdRequest>(&[r#"{"id":"0000000001"}"#.to_string()]).unwrap();
        assert_eq!(req.id, "0000000001");
    }
}
