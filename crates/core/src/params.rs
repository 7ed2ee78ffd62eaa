//! Resource parameters
//!
//! Probes are constructed from a set of named parameters, or from a single
//! scalar value for probes that have one identity field. This module holds the
//! parameter model, the shared validation rules, and the connection options
//! that every probe accepts on top of its own parameters.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Connection parameters accepted by every resource
pub const CONNECTION_PARAMS: [&str; 4] = [
    "aws_region",
    "aws_endpoint",
    "aws_retry_limit",
    "aws_retry_backoff",
];

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl ParamValue {
    /// String content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, accepting numeric strings
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            ParamValue::String(s) => s.trim().parse().ok(),
            ParamValue::Boolean(_) => None,
        }
    }

    /// Empty strings are the only empty values; numbers and booleans never are
    pub fn is_empty(&self) -> bool {
        matches!(self, ParamValue::String(s) if s.is_empty())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Boolean(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

/// Named parameters for a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceParams(BTreeMap<String, ParamValue>);

impl ResourceParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Look up a string parameter
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// A required identity parameter, which must be a string
    pub fn require_str(&self, resource: &str, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(ParamValue::String(s)) => Ok(s),
            Some(_) => Err(Error::InvalidParameter(format!(
                "{resource}: `{key}` must be a string"
            ))),
            None => Err(Error::InvalidParameter(format!(
                "{resource}: `{key}` must be provided"
            ))),
        }
    }

    /// Parameter names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a `key=value` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Result<(String, ParamValue)> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            Error::InvalidParameter(format!("'{pair}' is not in key=value form"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "'{pair}' has an empty parameter name"
            )));
        }
        Ok((key.to_string(), ParamValue::String(value.to_string())))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ResourceParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How a resource was addressed: a bare identifier or named parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceInput {
    Scalar(String),
    Params(ResourceParams),
}

impl ResourceInput {
    /// Resolve into named parameters.
    ///
    /// `scalar_key` names the identity parameter a scalar maps to; resources
    /// without one pass `None` and reject the scalar form.
    pub fn into_params(self, resource: &str, scalar_key: Option<&str>) -> Result<ResourceParams> {
        match (self, scalar_key) {
            (ResourceInput::Params(params), _) => Ok(params),
            (ResourceInput::Scalar(value), Some(key)) => Ok(ResourceParams::new().with(key, value)),
            (ResourceInput::Scalar(_), None) => Err(Error::InvalidParameter(format!(
                "{resource}: scalar arguments not supported"
            ))),
        }
    }
}

impl From<&str> for ResourceInput {
    fn from(value: &str) -> Self {
        ResourceInput::Scalar(value.to_string())
    }
}

impl From<String> for ResourceInput {
    fn from(value: String) -> Self {
        ResourceInput::Scalar(value)
    }
}

impl From<ResourceParams> for ResourceInput {
    fn from(value: ResourceParams) -> Self {
        ResourceInput::Params(value)
    }
}

/// Check a parameter set against a resource's required and optional keys.
///
/// Connection parameters are always allowed.
pub fn validate_parameters(
    resource: &str,
    params: &ResourceParams,
    required: &[&str],
    allow: &[&str],
) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| params.get(key).is_none_or(ParamValue::is_empty))
        .collect();
    if !missing.is_empty() {
        return Err(Error::InvalidParameter(format!(
            "{resource}: `{}` must be provided",
            missing.join(", ")
        )));
    }

    let unexpected: Vec<&str> = params
        .keys()
        .filter(|key| {
            !required.contains(key) && !allow.contains(key) && !CONNECTION_PARAMS.contains(key)
        })
        .collect();
    if !unexpected.is_empty() {
        return Err(Error::InvalidParameter(format!(
            "{resource}: unexpected arguments found: {}",
            unexpected.join(", ")
        )));
    }

    if params.iter().any(|(_, value)| value.is_empty()) {
        return Err(Error::InvalidParameter(format!(
            "{resource}: provided parameter should not be empty"
        )));
    }

    Ok(())
}

/// Per-resource overrides for how the AWS client is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Region override
    pub region: Option<String>,

    /// Endpoint URL override
    pub endpoint: Option<String>,

    /// Maximum SDK attempts
    pub retry_limit: Option<u32>,

    /// Initial SDK retry backoff
    pub retry_backoff: Option<Duration>,
}

impl ConnectionOptions {
    /// Extract the connection parameters from a resource's parameter set
    pub fn from_params(params: &ResourceParams) -> Result<Self> {
        let region = match params.get("aws_region") {
            None => None,
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or_else(|| Error::InvalidParameter("aws_region must be a string".into()))?
                    .to_string(),
            ),
        };

        let endpoint = match params.get("aws_endpoint") {
            None => None,
            Some(value) => {
                let raw = value.as_str().ok_or_else(|| {
                    Error::InvalidParameter("aws_endpoint must be a string".into())
                })?;
                url::Url::parse(raw)?;
                Some(raw.to_string())
            }
        };

        let retry_limit = match params.get("aws_retry_limit") {
            None => None,
            Some(value) => Some(non_negative(value, "aws_retry_limit")? as u32),
        };

        let retry_backoff = match params.get("aws_retry_backoff") {
            None => None,
            Some(value) => Some(Duration::from_secs(non_negative(value, "aws_retry_backoff")?)),
        };

        Ok(Self {
            region,
            endpoint,
            retry_limit,
            retry_backoff,
        })
    }
}

fn non_negative(value: &ParamValue, name: &str) -> Result<u64> {
    value
        .as_integer()
        .and_then(|i| u32::try_from(i).ok())
        .map(u64::from)
        .ok_or_else(|| Error::InvalidParameter(format!("{name} must be a non-negative integer")))
}
