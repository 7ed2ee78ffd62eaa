//! Resource base
//!
//! Every probe follows the same life cycle: validate parameters, make one
//! AWS read call, then expose the response. [`ProbeState`] holds the outcome
//! of that call and [`catch_aws_errors`] decides how an AWS error shows up:
//! a missing resource is simply absent, anything else marks the probe failed.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::ResourceRecord;

/// Common interface of all probes
pub trait Resource: fmt::Display + fmt::Debug + Send + Sync {
    /// Resource type name, e.g. `aws_securityhub_hub`
    fn resource_name(&self) -> &'static str;

    /// Whether the AWS call returned a non-empty response
    fn exists(&self) -> bool;

    /// Why the probe could not be evaluated, if it failed
    fn failure(&self) -> Option<&str>;

    /// The response record, if any
    fn record(&self) -> Option<&ResourceRecord>;

    /// Stable identifier of the probed resource
    fn resource_id(&self) -> String;

    /// Generic attribute lookup by (dotted) name
    fn attribute(&self, path: &str) -> Option<&Value> {
        self.record().and_then(|r| r.get_path(path))
    }
}

/// Outcome of a probe's AWS call
#[derive(Debug, Clone)]
pub struct ProbeState<T> {
    resource_name: &'static str,
    display_name: String,
    response: Option<T>,
    record: Option<ResourceRecord>,
    failure: Option<String>,
}

impl<T> ProbeState<T> {
    pub fn resource_name(&self) -> &'static str {
        self.resource_name
    }

    /// Name used in the probe's `Display` output
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn exists(&self) -> bool {
        self.record.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Typed response, only when the resource exists
    pub fn response(&self) -> Option<&T> {
        if self.exists() {
            self.response.as_ref()
        } else {
            None
        }
    }

    pub fn record(&self) -> Option<&ResourceRecord> {
        self.record.as_ref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// Turn the result of a probe's AWS call into its state.
///
/// Errors from the AWS call never escape: a not-found error leaves the probe
/// without a record, every other error marks it failed. Local errors (bad
/// parameters, malformed responses) are returned as `Err`.
pub fn catch_aws_errors<T: Serialize>(
    resource_name: &'static str,
    display_name: impl Into<String>,
    result: Result<T>,
) -> Result<ProbeState<T>> {
    let display_name = display_name.into();
    let mut state = ProbeState {
        resource_name,
        display_name,
        response: None,
        record: None,
        failure: None,
    };

    match result {
        Ok(response) => {
            state.record = Some(ResourceRecord::from_response(&response)?);
            state.response = Some(response);
        }
        Err(Error::NotFound(detail)) => {
            tracing::debug!(resource = resource_name, %detail, "resource not found");
        }
        Err(Error::MissingCredentials(detail)) => {
            tracing::error!(
                resource = resource_name,
                %detail,
                "no AWS credentials available; configure a profile or the AWS environment variables"
            );
            state.failure = Some("No AWS credentials available".to_string());
        }
        Err(Error::Auth(detail)) => {
            state.failure = Some(format!(
                "Access denied while probing {resource_name} ({}): {detail}",
                state.display_name
            ));
        }
        Err(err) if err.is_aws_error() => {
            tracing::warn!(
                resource = resource_name,
                error = %err,
                "AWS service error encountered while probing resource"
            );
            state.failure = Some(err.to_string());
        }
        Err(err) => return Err(err),
    }

    Ok(state)
}
