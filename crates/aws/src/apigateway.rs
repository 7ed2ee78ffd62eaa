//! API Gateway client
//!
//! Wraps aws-sdk-apigateway and implements the ApiGatewayApi trait from ap-core.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use aws_sdk_apigateway::operation::get_client_certificate::GetClientCertificateOutput;
use aws_sdk_apigateway::operation::get_gateway_response::GetGatewayResponseOutput;
use aws_sdk_apigateway::types::GatewayResponseType;

use ap_core::{ApiGatewayApi, ClientCertificate, GatewayResponse, Result};

use crate::error::from_sdk_error;
use crate::timestamp;

/// API Gateway client wrapper
pub struct ApiGatewayClient {
    inner: aws_sdk_apigateway::Client,
}

impl ApiGatewayClient {
    pub fn new(inner: aws_sdk_apigateway::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ApiGatewayApi for ApiGatewayClient {
    async fn get_gateway_response(
        &self,
        rest_api_id: &str,
        response_type: &str,
    ) -> Result<GatewayResponse> {
        let response = self
            .inner
            .get_gateway_response()
            .rest_api_id(rest_api_id)
            .response_type(GatewayResponseType::from(response_type))
            .send()
            .await
            .map_err(|e| {
                from_sdk_error(
                    e,
                    &format!("GetGatewayResponse {response_type} of {rest_api_id}"),
                )
            })?;

        Ok(gateway_response(&response))
    }

    async fn get_client_certificate(
        &self,
        client_certificate_id: &str,
    ) -> Result<ClientCertificate> {
        let response = self
            .inner
            .get_client_certificate()
            .client_certificate_id(client_certificate_id)
            .send()
            .await
            .map_err(|e| from_sdk_error(e, &format!("GetClientCertificate {client_certificate_id}")))?;

        Ok(client_certificate(&response))
    }
}

fn gateway_response(output: &GetGatewayResponseOutput) -> GatewayResponse {
    GatewayResponse {
        response_type: output.response_type().map(|t| t.as_str().to_string()),
        status_code: output.status_code().map(str::to_string),
        response_parameters: output.response_parameters().map(sorted),
        response_templates: output.response_templates().map(sorted),
        default_response: Some(output.default_response()),
    }
}

fn client_certificate(output: &GetClientCertificateOutput) -> ClientCertificate {
    ClientCertificate {
        client_certificate_id: output.client_certificate_id().map(str::to_string),
        description: output.description().map(str::to_string),
        pem_encoded_certificate: output.pem_encoded_certificate().map(str::to_string),
        created_date: output.created_date().and_then(timestamp),
        expiration_date: output.expiration_date().and_then(timestamp),
        tags: output.tags().map(sorted),
    }
}

fn sorted(map: &HashMap<String, String>) -> BTreeMap<String, String> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_apigateway::primitives::DateTime;

    #[test]
    fn test_gateway_response_conversion() {
        let output = GetGatewayResponseOutput::builder()
            .response_type(GatewayResponseType::Default4Xx)
            .status_code("403")
            .response_parameters("gatewayresponse.header.x-request-id", "context.requestId")
            .response_templates("application/json", "{}")
            .default_response(false)
            .build();

        let response = gateway_response(&output);
        assert_eq!(response.response_type.as_deref(), Some("DEFAULT_4XX"));
        assert_eq!(response.status_code.as_deref(), Some("403"));
        assert_eq!(
            response.response_parameters.unwrap()["gatewayresponse.header.x-request-id"],
            "context.requestId"
        );
        assert_eq!(response.response_templates.unwrap().len(), 1);
        assert_eq!(response.default_response, Some(false));
    }

    #[test]
    fn test_client_certificate_conversion() {
        let output = GetClientCertificateOutput::builder()
            .client_certificate_id("9ktqab")
            .description("backend mTLS")
            .created_date(DateTime::from_secs(1_700_000_000))
            .tags("env", "prod")
            .build();

        let cert = client_certificate(&output);
        assert_eq!(cert.client_certificate_id.as_deref(), Some("9ktqab"));
        assert_eq!(cert.description.as_deref(), Some("backend mTLS"));
        assert_eq!(cert.created_date.unwrap().as_second(), 1_700_000_000);
        assert!(cert.expiration_date.is_none());
        assert!(cert.pem_encoded_certificate.is_none());
        assert_eq!(cert.tags.unwrap()["env"], "prod");
    }

    #[test]
    fn test_empty_certificate_conversion() {
        let cert = client_certificate(&GetClientCertificateOutput::builder().build());
        assert_eq!(cert, ClientCertificate::default());
    }
}
