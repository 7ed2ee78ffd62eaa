//! AWS connection
//!
//! Builds SDK configuration from a connection profile plus per-resource
//! connection options, and hands out service clients through the
//! `Connector` trait from ap-core.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use ap_core::{
    ApiGatewayApi, ConnectionOptions, Connector, CredentialSource, Profile, Result, SecurityHubApi,
};

use crate::apigateway::ApiGatewayClient;
use crate::securityhub::SecurityHubClient;

/// Effective settings for one SDK configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub max_attempts: Option<u32>,
    pub initial_backoff: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
}

impl ConnectionSettings {
    /// Merge a profile with per-resource options; the options win.
    ///
    /// `aws_retry_limit` counts retries, so it maps to one more attempt.
    pub fn resolve(profile: Option<&Profile>, options: &ConnectionOptions) -> Self {
        let mut settings = Self::default();

        if let Some(profile) = profile {
            settings.region = Some(profile.region.clone());
            settings.endpoint = profile.endpoint.clone();
            if let Some(retry) = &profile.retry {
                settings.max_attempts = Some(retry.max_attempts);
                settings.initial_backoff = Some(Duration::from_millis(retry.initial_backoff_ms));
            }
            if let Some(timeout) = &profile.timeout {
                settings.connect_timeout = Some(Duration::from_millis(timeout.connect_ms));
                settings.read_timeout = Some(Duration::from_millis(timeout.read_ms));
            }
        }

        if let Some(region) = &options.region {
            settings.region = Some(region.clone());
        }
        if let Some(endpoint) = &options.endpoint {
            settings.endpoint = Some(endpoint.clone());
        }
        if let Some(limit) = options.retry_limit {
            settings.max_attempts = Some(limit.saturating_add(1));
        }
        if let Some(backoff) = options.retry_backoff {
            settings.initial_backoff = Some(backoff);
        }

        settings
    }
}

/// Connector backed by the AWS SDK
#[derive(Debug, Clone, Default)]
pub struct AwsConnector {
    profile: Option<Profile>,
}

impl AwsConnector {
    /// Connect with a profile, or with the SDK environment when `None`
    pub fn new(profile: Option<Profile>) -> Self {
        Self { profile }
    }

    /// Load SDK configuration for the given per-resource options
    pub async fn sdk_config(&self, options: &ConnectionOptions) -> aws_config::SdkConfig {
        let settings = ConnectionSettings::resolve(self.profile.as_ref(), options);
        tracing::debug!(
            ?settings,
            profile = ?self.profile.as_ref().map(|p| &p.name),
            "loading AWS configuration"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &self.profile {
            loader = match profile.credential_source() {
                CredentialSource::Static {
                    access_key,
                    secret_key,
                    session_token,
                } => loader.credentials_provider(aws_credential_types::Credentials::new(
                    access_key,
                    secret_key,
                    session_token.map(str::to_string),
                    None,
                    "awsprobe-static-credentials",
                )),
                CredentialSource::SharedProfile(name) => loader.profile_name(name),
                CredentialSource::DefaultChain => loader,
            };
        }

        if let Some(region) = settings.region {
            loader = loader.region(aws_config::Region::new(region));
        }
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if settings.max_attempts.is_some() || settings.initial_backoff.is_some() {
            let mut retry = aws_config::retry::RetryConfig::standard();
            if let Some(attempts) = settings.max_attempts {
                retry = retry.with_max_attempts(attempts.max(1));
            }
            if let Some(backoff) = settings.initial_backoff {
                retry = retry.with_initial_backoff(backoff);
            }
            loader = loader.retry_config(retry);
        }

        if settings.connect_timeout.is_some() || settings.read_timeout.is_some() {
            let mut timeout = aws_config::timeout::TimeoutConfig::builder();
            if let Some(connect) = settings.connect_timeout {
                timeout = timeout.connect_timeout(connect);
            }
            if let Some(read) = settings.read_timeout {
                timeout = timeout.read_timeout(read);
            }
            loader = loader.timeout_config(timeout.build());
        }

        loader.load().await
    }
}

#[async_trait]
impl Connector for AwsConnector {
    async fn api_gateway(&self, options: &ConnectionOptions) -> Result<Arc<dyn ApiGatewayApi>> {
        let config = self.sdk_config(options).await;
        Ok(Arc::new(ApiGatewayClient::new(aws_sdk_apigateway::Client::new(
            &config,
        ))))
    }

    async fn security_hub(
        &self,
        options: &ConnectionOptions,
    ) -> Result<Arc<dyn SecurityHubApi>> {
        let config = self.sdk_config(options).await;
        Ok(Arc::new(SecurityHubClient::new(
            aws_sdk_securityhub::Client::new(&config),
        )))
    }
}
