//! ap-aws: AWS SDK adapter for awsprobe
//!
//! This crate provides the implementations of the service API traits
//! from ap-core using the AWS SDK crates. It is the only crate that
//! directly depends on the AWS SDK.

pub mod apigateway;
pub mod client;
mod error;
pub mod securityhub;

pub use apigateway::ApiGatewayClient;
pub use client::{AwsConnector, ConnectionSettings};
pub use securityhub::SecurityHubClient;

/// Convert an SDK timestamp, keeping sub-second precision
pub(crate) fn timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}
