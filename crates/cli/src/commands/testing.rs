//! In-memory service fakes for command tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use ap_core::{
    ApiGatewayApi, ClientCertificate, ConnectionOptions, Connector, Error, GatewayResponse, Hub,
    Result, SecurityHubApi,
};

/// Serves canned responses; anything not registered is `NotFound`
#[derive(Debug, Clone, Default)]
pub struct FakeAws {
    pub gateway_responses: HashMap<(String, String), GatewayResponse>,
    pub certificates: HashMap<String, ClientCertificate>,
    pub hubs: HashMap<String, Hub>,
    /// Error returned by every call, e.g. to simulate denied access
    pub deny: Option<String>,
}

impl FakeAws {
    fn check(&self) -> Result<()> {
        match &self.deny {
            Some(message) => Err(Error::Auth(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ApiGatewayApi for FakeAws {
    async fn get_gateway_response(
        &self,
        rest_api_id: &str,
        response_type: &str,
    ) -> Result<GatewayResponse> {
        self.check()?;
        self.gateway_responses
            .get(&(rest_api_id.to_string(), response_type.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{rest_api_id}/{response_type}")))
    }

    async fn get_client_certificate(&self, client_certificate_id: &str) -> Result<ClientCertificate> {
        self.check()?;
        self.certificates
            .get(client_certificate_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(client_certificate_id.to_string()))
    }
}

#[async_trait]
impl SecurityHubApi for FakeAws {
    async fn describe_hub(&self, hub_arn: &str) -> Result<Hub> {
        self.check()?;
        self.hubs
            .get(hub_arn)
            .cloned()
            .ok_or_else(|| Error::NotFound(hub_arn.to_string()))
    }
}

#[async_trait]
impl Connector for FakeAws {
    async fn api_gateway(&self, _options: &ConnectionOptions) -> Result<Arc<dyn ApiGatewayApi>> {
        Ok(Arc::new(self.clone()))
    }

    async fn security_hub(&self, _options: &ConnectionOptions) -> Result<Arc<dyn SecurityHubApi>> {
        Ok(Arc::new(self.clone()))
    }
}

/// A fake account with one customised gateway response and one hub
pub fn account() -> FakeAws {
    let mut aws = FakeAws::default();
    aws.gateway_responses.insert(
        ("a1b2c3".into(), "DEFAULT_4XX".into()),
        GatewayResponse {
            response_type: Some("DEFAULT_4XX".into()),
            status_code: Some("403".into()),
            response_parameters: Some(
                [(
                    "gatewayresponse.header.Access-Control-Allow-Origin".to_string(),
                    "'*'".to_string(),
                )]
                .into(),
            ),
            response_templates: None,
            default_response: Some(false),
        },
    );
    aws.hubs.insert(
        "arn:aws:securityhub:us-east-1:123456789012:hub/default".into(),
        Hub {
            hub_arn: Some("arn:aws:securityhub:us-east-1:123456789012:hub/default".into()),
            subscribed_at: Some("2023-01-05T10:00:00.000Z".into()),
            auto_enable_controls: Some(true),
            control_finding_generator: Some("SECURITY_CONTROL".into()),
        },
    );
    aws
}
