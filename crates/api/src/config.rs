//! Host configuration from the environment.

use anyhow::Context;
use chrono::Duration;

use cargotrack_infra::KeySpace;
use cargotrack_observability::LogFormat;

use crate::context::{InvocationContext, SubmissionPolicy};

pub const DEFAULT_NAMESPACE: &str = "sample.PreciousCargoChaincode";

const NAMESPACE_VAR: &str = "CARGOTRACK_NAMESPACE";
const MAX_SKEW_VAR: &str = "CARGOTRACK_MAX_SUBMISSION_SKEW_SECS";
const LOG_FORMAT_VAR: &str = "CARGOTRACK_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub namespace: String,
    pub submission_policy: SubmissionPolicy,
    pub log_format: LogFormat,
}

impl HostConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let namespace = lookup(NAMESPACE_VAR).unwrap_or_else(|| {
            tracing::debug!("{NAMESPACE_VAR} not set; using {DEFAULT_NAMESPACE}");
            DEFAULT_NAMESPACE.to_string()
        });

        let submission_policy = match lookup(MAX_SKEW_VAR) {
            None => SubmissionPolicy::Unbounded,
            Some(raw) => {
                let secs: u32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{MAX_SKEW_VAR} must be a whole number of seconds, got '{raw}'"))?;
                SubmissionPolicy::MaxSkew(Duration::seconds(i64::from(secs)))
            }
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => LogFormat::default(),
            Some(raw) => raw.parse::<LogFormat>().with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?,
        };

        Ok(Self {
            namespace,
            submission_policy,
            log_format,
        })
    }

    /// Invocation context for this configuration.
    pub fn context(&self) -> anyhow::Result<InvocationContext> {
        let keyspace = KeySpace::new(self.namespace.clone())
            .with_context(|| format!("invalid {NAMESPACE_VAR}"))?;
        Ok(InvocationContext::new(keyspace).with_submission_policy(self.submission_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| vars.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = HostConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.submission_policy, SubmissionPolicy::Unbounded);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.context().unwrap().keyspace().namespace(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn reads_all_variables() {
        let config = HostConfig::from_lookup(lookup(&[
            (NAMESPACE_VAR, "acme.cargo"),
            (MAX_SKEW_VAR, "3600"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.namespace, "acme.cargo");
        assert_eq!(config.submission_policy, SubmissionPolicy::MaxSkew(Duration::hours(1)));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(HostConfig::from_lookup(lookup(&[(MAX_SKEW_VAR, "an hour")])).is_err());
        assert!(HostConfig::from_lookup(lookup(&[(MAX_SKEW_VAR, "-5")])).is_err());
        assert!(HostConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).is_err());

        let config = HostConfig::from_lookup(lookup(&[(NAMESPACE_VAR, "bad#ns")])).unwrap();
        assert!(config.context().is_err());
    }
}
