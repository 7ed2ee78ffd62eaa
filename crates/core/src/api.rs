//! Service API traits
//!
//! These traits define the AWS read calls the probes rely on. They keep the
//! probes decoupled from the AWS SDK: the SDK adapter implements them, and
//! tests use mocks.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::ConnectionOptions;

/// An API Gateway gateway response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Response type, e.g. `DEFAULT_4XX`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,

    /// HTTP status code override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    /// Header mappings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_parameters: Option<BTreeMap<String, String>>,

    /// Body templates keyed by content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_templates: Option<BTreeMap<String, String>>,

    /// Whether this is the built-in default rather than a customised response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_response: Option<bool>,
}

/// An API Gateway client certificate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientCertificate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// PEM-encoded public key of the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pem_encoded_certificate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

/// A Security Hub hub resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_arn: Option<String>,

    /// When the account subscribed, as reported by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<String>,

    /// Whether new controls are enabled automatically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_enable_controls: Option<bool>,

    /// `SECURITY_CONTROL` or `STANDARD_CONTROL`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_finding_generator: Option<String>,
}

/// API Gateway read operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiGatewayApi: Send + Sync {
    /// Get a gateway response of a REST API
    async fn get_gateway_response(
        &self,
        rest_api_id: &str,
        response_type: &str,
    ) -> Result<GatewayResponse>;

    /// Get a client certificate
    async fn get_client_certificate(&self, client_certificate_id: &str)
    -> Result<ClientCertificate>;
}

/// Security Hub read operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecurityHubApi: Send + Sync {
    /// Describe the hub
    async fn describe_hub(&self, hub_arn: &str) -> Result<Hub>;
}

/// Produces service clients for a set of connection options
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    async fn api_gateway(&self, options: &ConnectionOptions) -> Result<Arc<dyn ApiGatewayApi>>;

    async fn security_hub(&self, options: &ConnectionOptions)
    -> Result<Arc<dyn SecurityHubApi>>;
}
