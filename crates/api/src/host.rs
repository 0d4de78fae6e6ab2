//! Local host: one transaction per invocation over an in-memory world state.
//!
//! ```text
//! submit(function, args)
//!   ↓
//! InMemoryWorldState::begin
//!   ↓
//! Dispatcher::invoke ──err──→ abort ──→ Err
//!   ↓ ok
//! Transaction::commit ──conflict──→ Err (nothing written)
//!   ↓
//! Ok(payload)
//! ```

use serde_json::{Value, json};

use cargotrack_infra::InMemoryWorldState;

use crate::app::errors::InvocationError;
use crate::context::InvocationContext;
use crate::dispatcher::Dispatcher;

#[derive(Debug)]
pub struct LocalHost {
    state: InMemoryWorldState,
    dispatcher: Dispatcher,
}

impl LocalHost {
    pub fn new(ctx: InvocationContext) -> Self {
        Self {
            state: InMemoryWorldState::new(),
            dispatcher: Dispatcher::new(ctx),
        }
    }

    pub fn state(&self) -> &InMemoryWorldState {
        &self.state
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run one invocation in its own unit of work and commit it on success.
    pub fn submit(&self, function: &str, args: &[String]) -> Result<Vec<u8>, InvocationError> {
        let mut tx = self.state.begin();
        let span = tracing::info_span!("tx", tx_id = %tx.tx_id());
        let _guard = span.enter();

        match self.dispatcher.invoke(&mut tx, function, args) {
            Ok(payload) => {
                let receipt = tx.commit()?;
                tracing::debug!(
                    height = receipt.height,
                    keys_written = receipt.keys_written,
                    "unit of work committed"
                );
                Ok(payload)
            }
            Err(e) => {
                tx.abort();
                Err(e)
            }
        }
    }
}

/// One result line of the host protocol.
///
/// Success payloads are embedded as JSON; a payload that is not JSON is
/// carried as a string.
pub fn outcome_json(outcome: &Result<Vec<u8>, InvocationError>) -> Value {
    match outcome {
        Ok(payload) => {
            let payload = serde_json::from_slice(payload)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(payload).into_owned()));
            json!({ "status": "success", "payload": payload })
        }
        Err(e) => json!({ "status": "error", "message": e.to_string() }),
    }
}

/// Split a protocol line into function name and argument list.
///
/// `<function> <json>` carries one argument; a bare `<function>` carries none.
pub fn parse_line(line: &str) -> Option<(&str, Vec<String>)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((function, arg)) => Some((function, vec![arg.trim().to_string()])),
        None => Some((line, Vec::new())),
    }
}
