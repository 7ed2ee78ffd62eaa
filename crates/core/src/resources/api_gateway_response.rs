//! aws_api_gateway_response
//!
//! Retrieves a gateway response of an API Gateway REST API.

use std::collections::BTreeMap;
use std::fmt;

use crate::api::{ApiGatewayApi, GatewayResponse};
use crate::error::Result;
use crate::params::{ResourceInput, validate_parameters};
use crate::record::ResourceRecord;
use crate::resource::{ProbeState, Resource, catch_aws_errors};

pub const RESOURCE_NAME: &str = "aws_api_gateway_response";

const REQUIRED: [&str; 2] = ["rest_api_id", "response_type"];

/// Probe over API Gateway `GetGatewayResponse`
#[derive(Debug)]
pub struct ApiGatewayResponse {
    rest_api_id: String,
    state: ProbeState<GatewayResponse>,
}

impl ApiGatewayResponse {
    /// Validate the input and fetch the gateway response
    pub async fn load(api: &dyn ApiGatewayApi, input: impl Into<ResourceInput>) -> Result<Self> {
        let params = input.into().into_params(RESOURCE_NAME, None)?;
        validate_parameters(RESOURCE_NAME, &params, &REQUIRED, &[])?;

        let rest_api_id = params.require_str(RESOURCE_NAME, "rest_api_id")?.to_string();
        let response_type = params.require_str(RESOURCE_NAME, "response_type")?.to_string();

        tracing::debug!(%rest_api_id, %response_type, "GetGatewayResponse");
        let result = api.get_gateway_response(&rest_api_id, &response_type).await;
        let state = catch_aws_errors(RESOURCE_NAME, response_type, result)?;

        Ok(Self { rest_api_id, state })
    }

    pub fn rest_api_id(&self) -> &str {
        &self.rest_api_id
    }

    pub fn response_type(&self) -> Option<&str> {
        self.state.response()?.response_type.as_deref()
    }

    pub fn status_code(&self) -> Option<&str> {
        self.state.response()?.status_code.as_deref()
    }

    pub fn response_parameters(&self) -> Option<&BTreeMap<String, String>> {
        self.state.response()?.response_parameters.as_ref()
    }

    pub fn response_templates(&self) -> Option<&BTreeMap<String, String>> {
        self.state.response()?.response_templates.as_ref()
    }

    pub fn default_response(&self) -> Option<bool> {
        self.state.response()?.default_response
    }
}

impl Resource for ApiGatewayResponse {
    fn resource_name(&self) -> &'static str {
        RESOURCE_NAME
    }

    fn exists(&self) -> bool {
        self.state.exists()
    }

    fn failure(&self) -> Option<&str> {
        self.state.failure()
    }

    fn record(&self) -> Option<&ResourceRecord> {
        self.state.record()
    }

    fn resource_id(&self) -> String {
        format!("{}/{}", self.rest_api_id, self.state.display_name())
    }
}

impl fmt::Display for ApiGatewayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response Type: {}", self.state.display_name())
    }
}
