use chrono::{DateTime, Duration, Utc};

use cargotrack_core::{DomainError, DomainResult};
use cargotrack_infra::KeySpace;

/// Bound on how far a shipment's `submittedAt` may lie from "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPolicy {
    #[default]
    Unbounded,
    MaxSkew(Duration),
}

impl SubmissionPolicy {
    /// Reject `submitted_at` when it is further than the allowed skew from
    /// `now`, in either direction.
    pub fn check(&self, submitted_at: DateTime<Utc>, now: DateTime<Utc>) -> DomainResult<()> {
        match self {
            SubmissionPolicy::Unbounded => Ok(()),
            SubmissionPolicy::MaxSkew(skew) => {
                let drift = (now - submitted_at).abs();
                if drift > *skew {
                    return Err(DomainError::validation(format!(
                        "Invalid submittedAt argument: must be within {}s of the current time.",
                        skew.num_seconds()
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Time source for invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Everything an invocation needs besides its arguments and the world state.
///
/// This is immutable and shared by all invocations of one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    keyspace: KeySpace,
    submission_policy: SubmissionPolicy,
    clock: Clock,
}

impl InvocationContext {
    pub fn new(keyspace: KeySpace) -> Self {
        Self {
            keyspace,
            submission_policy: SubmissionPolicy::default(),
            clock: Clock::default(),
        }
    }

    pub fn with_submission_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.submission_policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn keyspace(&self) -> &KeySpace {
        &self.keyspace
    }

    pub fn submission_policy(&self) -> SubmissionPolicy {
        self.submission_policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
