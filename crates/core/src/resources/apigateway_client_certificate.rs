//! aws_apigateway_client_certificate
//!
//! Gets information about an API Gateway client certificate.

use std::collections::BTreeMap;
use std::fmt;

use jiff::Timestamp;

use crate::api::{ApiGatewayApi, ClientCertificate};
use crate::error::Result;
use crate::params::{ResourceInput, validate_parameters};
use crate::record::ResourceRecord;
use crate::resource::{ProbeState, Resource, catch_aws_errors};

pub const RESOURCE_NAME: &str = "aws_apigateway_client_certificate";

/// Identity parameter; a scalar input is taken as this
pub const IDENTITY_PARAM: &str = "client_certificate_id";

/// Probe over API Gateway `GetClientCertificate`
#[derive(Debug)]
pub struct ApiGatewayClientCertificate {
    state: ProbeState<ClientCertificate>,
}

impl ApiGatewayClientCertificate {
    pub async fn load(api: &dyn ApiGatewayApi, input: impl Into<ResourceInput>) -> Result<Self> {
        let params = input.into().into_params(RESOURCE_NAME, Some(IDENTITY_PARAM))?;
        validate_parameters(RESOURCE_NAME, &params, &[IDENTITY_PARAM], &[])?;

        let id = params.require_str(RESOURCE_NAME, IDENTITY_PARAM)?.to_string();

        tracing::debug!(client_certificate_id = %id, "GetClientCertificate");
        let result = api.get_client_certificate(&id).await;
        let state = catch_aws_errors(RESOURCE_NAME, id, result)?;

        Ok(Self { state })
    }

    pub fn client_certificate_id(&self) -> Option<&str> {
        self.state.response()?.client_certificate_id.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.state.response()?.description.as_deref()
    }

    pub fn pem_encoded_certificate(&self) -> Option<&str> {
        self.state.response()?.pem_encoded_certificate.as_deref()
    }

    pub fn created_date(&self) -> Option<Timestamp> {
        self.state.response()?.created_date
    }

    pub fn expiration_date(&self) -> Option<Timestamp> {
        self.state.response()?.expiration_date
    }

    pub fn tags(&self) -> Option<&BTreeMap<String, String>> {
        self.state.response()?.tags.as_ref()
    }
}

impl Resource for ApiGatewayClientCertificate {
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

    // The record's id when the call returned one, otherwise the requested id
    fn resource_id(&self) -> String {
        self.state
            .record()
            .and_then(|r| r.get(IDENTITY_PARAM))
            .and_then(|v| v.as_str())
            .unwrap_or(self.state.display_name())
            .to_string()
    }
}

impl fmt::Display for ApiGatewayClientCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client Certificate ID: {}", self.state.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiGatewayApi;
    use crate::error::Error;
    use crate::params::ResourceParams;
    use mockall::predicate::eq;

    fn sample() -> ClientCertificate {
        ClientCertificate {
            client_certificate_id: Some("9ktqab".into()),
            description: Some("backend mTLS".into()),
            pem_encoded_certificate: Some("-----BEGIN CERTIFICATE-----".into()),
            created_date: Some(Timestamp::from_second(1_700_000_000).unwrap()),
            expiration_date: Some(Timestamp::from_second(1_731_536_000).unwrap()),
            tags: Some(BTreeMap::from([("env".to_string(), "prod".to_string())])),
        }
    }

    #[tokio::test]
    async fn test_load_scalar() {
        let mut api = MockApiGatewayApi::new();
        api.expect_get_client_certificate()
            .with(eq("9ktqab"))
            .times(1)
            .returning(|_| Ok(sample()));

        let probe = ApiGatewayClientCertificate::load(&api, "9ktqab").await.unwrap();
        assert!(probe.exists());
        assert_eq!(probe.client_certificate_id(), Some("9ktqab"));
        assert_eq!(probe.description(), Some("backend mTLS"));
        assert!(probe.expiration_date().unwrap() > probe.created_date().unwrap());
        assert_eq!(probe.tags().unwrap().get("env").map(String::as_str), Some("prod"));
        assert_eq!(probe.attribute("tags.env").and_then(|v| v.as_str()), Some("prod"));
        assert_eq!(probe.resource_id(), "9ktqab");
        assert_eq!(probe.to_string(), "Client Certificate ID: 9ktqab");
    }

    #[tokio::test]
    async fn test_load_params() {
        let mut api = MockApiGatewayApi::new();
        api.expect_get_client_certificate().returning(|_| Ok(sample()));

        let params = ResourceParams::new().with(IDENTITY_PARAM, "9ktqab");
        let probe = ApiGatewayClientCertificate::load(&api, params).await.unwrap();
        assert!(probe.exists());
    }

    #[tokio::test]
    async fn test_not_found_keeps_display_name_as_id() {
        let mut api = MockApiGatewayApi::new();
        api.expect_get_client_certificate()
            .returning(|_| Err(Error::NotFound("Invalid certificate identifier".into())));

        let probe = ApiGatewayClientCertificate::load(&api, "missing").await.unwrap();
        assert!(!probe.exists());
        assert_eq!(probe.client_certificate_id(), None);
        assert_eq!(probe.resource_id(), "missing");
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let api = MockApiGatewayApi::new();
        let err = ApiGatewayClientCertificate::load(&api, "").await.unwrap_err();
        assert!(err.to_string().contains("`client_certificate_id` must be provided"));
    }

    #[tokio::test]
    async fn test_numeric_id_from_control_rejected() {
        let mut api = MockApiGatewayApi::new();
        api.expect_get_client_certificate().never();

        let params: ResourceParams = toml::from_str("client_certificate_id = 12345").unwrap();
        let err = ApiGatewayClientCertificate::load(&api, params).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("`client_certificate_id` must be a string"));
    }

    #[tokio::test]
    async fn test_unexpected_param_rejected() {
        let api = MockApiGatewayApi::new();
        let params = ResourceParams::new()
            .with(IDENTITY_PARAM, "9ktqab")
            .with("rest_api_id", "a1b2c3");
        let err = ApiGatewayClientCertificate::load(&api, params).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
