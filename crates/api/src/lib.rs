//! Invocation layer: typed operations, dispatch, and the local host.

pub mod app;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod host;

pub use app::errors::{ErrorClass, InvocationError};
pub use config::HostConfig;
pub use context::{Clock, InvocationContext, SubmissionPolicy};
pub use dispatcher::{Dispatcher, Function};
pub use host::LocalHost;
