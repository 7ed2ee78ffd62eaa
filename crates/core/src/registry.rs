//! Resource registry
//!
//! Maps resource type names to probes, and loads a probe through a
//! [`Connector`] so callers don't need to know which AWS service backs it.

use std::fmt;
use std::str::FromStr;

use crate::api::Connector;
use crate::error::{Error, Result};
use crate::params::{ConnectionOptions, ResourceInput};
use crate::resource::Resource;
use crate::resources::{
    ApiGatewayClientCertificate, ApiGatewayResponse, SecurityHubHub, api_gateway_response,
    apigateway_client_certificate, securityhub_hub,
};

/// Supported resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ApiGatewayResponse,
    ApiGatewayClientCertificate,
    SecurityHubHub,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::ApiGatewayResponse,
        ResourceKind::ApiGatewayClientCertificate,
        ResourceKind::SecurityHubHub,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ApiGatewayResponse => api_gateway_response::RESOURCE_NAME,
            Self::ApiGatewayClientCertificate => apigateway_client_certificate::RESOURCE_NAME,
            Self::SecurityHubHub => securityhub_hub::RESOURCE_NAME,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ApiGatewayResponse => "Retrieves API Gateway Response.",
            Self::ApiGatewayClientCertificate => {
                "Gets information about the current ClientCertificate resource."
            }
            Self::SecurityHubHub => "Gets information Security Hub.",
        }
    }

    /// Example control exercising this resource
    pub const fn example(self) -> &'static str {
        match self {
            Self::ApiGatewayResponse => {
                "resource = \"aws_api_gateway_response\"\n\
                 params = { rest_api_id = \"REST_API_ID\", response_type = \"RESPONSE_TYPE\" }\n\
                 expect = { exists = true }"
            }
            Self::ApiGatewayClientCertificate => {
                "resource = \"aws_apigateway_client_certificate\"\n\
                 target = \"ClientCertificateID\"\n\
                 expect = { exists = true }"
            }
            Self::SecurityHubHub => {
                "resource = \"aws_securityhub_hub\"\n\
                 target = \"HUB_ARN\"\n\
                 expect = { exists = true }"
            }
        }
    }

    /// Parameter a scalar input maps to, for resources that accept one
    pub const fn scalar_param(self) -> Option<&'static str> {
        match self {
            Self::ApiGatewayResponse => None,
            Self::ApiGatewayClientCertificate => Some(apigateway_client_certificate::IDENTITY_PARAM),
            Self::SecurityHubHub => Some(securityhub_hub::IDENTITY_PARAM),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown resource type: {s}")))
    }
}

/// Load a probe of the given kind.
///
/// Connection parameters in `input` are applied to the client the connector
/// builds for this probe only.
pub async fn load_resource(
    kind: ResourceKind,
    input: ResourceInput,
    connector: &dyn Connector,
) -> Result<Box<dyn Resource>> {
    let options = match &input {
        ResourceInput::Params(params) => ConnectionOptions::from_params(params)?,
        ResourceInput::Scalar(_) => ConnectionOptions::default(),
    };

    let resource: Box<dyn Resource> = match kind {
        ResourceKind::ApiGatewayResponse => {
            let api = connector.api_gateway(&options).await?;
            Box::new(ApiGatewayResponse::load(api.as_ref(), input).await?)
        }
        ResourceKind::ApiGatewayClientCertificate => {
            let api = connector.api_gateway(&options).await?;
            Box::new(ApiGatewayClientCertificate::load(api.as_ref(), input).await?)
        }
        ResourceKind::SecurityHubHub => {
            let api = connector.security_hub(&options).await?;
            Box::new(SecurityHubHub::load(api.as_ref(), input).await?)
        }
    };

    Ok(resource)
}
