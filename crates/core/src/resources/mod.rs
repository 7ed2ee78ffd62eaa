//! Resource probes
//!
//! One module per AWS resource type.

pub mod api_gateway_response;
pub mod apigateway_client_certificate;
pub mod securityhub_hub;

pub use api_gateway_response::ApiGatewayResponse;
pub use apigateway_client_certificate::ApiGatewayClientCertificate;
pub use securityhub_hub::SecurityHubHub;
