//! aws_securityhub_hub
//!
//! Gets information about the Security Hub hub of an account.

use std::fmt;

use crate::api::{Hub, SecurityHubApi};
use crate::error::Result;
use crate::params::{ResourceInput, validate_parameters};
use crate::record::ResourceRecord;
use crate::resource::{ProbeState, Resource, catch_aws_errors};

pub const RESOURCE_NAME: &str = "aws_securityhub_hub";

pub const IDENTITY_PARAM: &str = "hub_arn";

/// Probe over Security Hub `DescribeHub`
#[derive(Debug)]
pub struct SecurityHubHub {
    state: ProbeState<Hub>,
}

impl SecurityHubHub {
    pub async fn load(api: &dyn SecurityHubApi, input: impl Into<ResourceInput>) -> Result<Self> {
        let params = input.into().into_params(RESOURCE_NAME, Some(IDENTITY_PARAM))?;
        validate_parameters(RESOURCE_NAME, &params, &[IDENTITY_PARAM], &[])?;

        let hub_arn = params.require_str(RESOURCE_NAME, IDENTITY_PARAM)?.to_string();

        tracing::debug!(%hub_arn, "DescribeHub");
        let result = api.describe_hub(&hub_arn).await;
        let state = catch_aws_errors(RESOURCE_NAME, hub_arn, result)?;

        Ok(Self { state })
    }

    pub fn hub_arn(&self) -> Option<&str> {
        self.state.response()?.hub_arn.as_deref()
    }

    pub fn subscribed_at(&self) -> Option<&str> {
        self.state.response()?.subscribed_at.as_deref()
    }

    pub fn auto_enable_controls(&self) -> Option<bool> {
        self.state.response()?.auto_enable_controls
    }

    pub fn control_finding_generator(&self) -> Option<&str> {
        self.state.response()?.control_finding_generator.as_deref()
    }
}

impl Resource for SecurityHubHub {
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
        self.state
            .record()
            .and_then(|r| r.get(IDENTITY_PARAM))
            .and_then(|v| v.as_str())
            .unwrap_or(self.state.display_name())
            .to_string()
    }
}

impl fmt::Display for SecurityHubHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HUB ARN: {}", self.state.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSecurityHubApi;
    use crate::error::Error;

    const ARN: &str = "arn:aws:securityhub:us-east-1:123456789012:hub/default";

    #[tokio::test]
    async fn test_load_existing() {
        let mut api = MockSecurityHubApi::new();
        api.expect_describe_hub().times(1).returning(|arn| {
            Ok(Hub {
                hub_arn: Some(arn.to_string()),
                subscribed_at: Some("2023-01-05T10:00:00.000Z".into()),
                auto_enable_controls: Some(true),
                control_finding_generator: Some("SECURITY_CONTROL".into()),
            })
        });

        let probe = SecurityHubHub::load(&api, ARN).await.unwrap();
        assert!(probe.exists());
        assert_eq!(probe.hub_arn(), Some(ARN));
        assert_eq!(probe.subscribed_at(), Some("2023-01-05T10:00:00.000Z"));
        assert_eq!(probe.auto_enable_controls(), Some(true));
        assert_eq!(probe.control_finding_generator(), Some("SECURITY_CONTROL"));
        assert_eq!(probe.resource_id(), ARN);
        assert_eq!(probe.to_string(), format!("HUB ARN: {ARN}"));
    }

    #[tokio::test]
    async fn test_hub_not_enabled() {
        let mut api = MockSecurityHubApi::new();
        api.expect_describe_hub()
            .returning(|_| Err(Error::NotFound("Account is not subscribed to AWS Security Hub".into())));

        let probe = SecurityHubHub::load(&api, ARN).await.unwrap();
        assert!(!probe.exists());
        assert_eq!(probe.hub_arn(), None);
        assert_eq!(probe.auto_enable_controls(), None);
    }

    #[tokio::test]
    async fn test_access_denied_fails_resource() {
        let mut api = MockSecurityHubApi::new();
        api.expect_describe_hub()
            .returning(|_| Err(Error::Auth("not authorized to perform securityhub:DescribeHub".into())));

        let probe = SecurityHubHub::load(&api, ARN).await.unwrap();
        assert!(!probe.exists());
        assert!(probe.failure().unwrap().contains("securityhub:DescribeHub"));
    }

    #[tokio::test]
    async fn test_missing_arn() {
        let api = MockSecurityHubApi::new();
        let err = SecurityHubHub::load(&api, crate::params::ResourceParams::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("`hub_arn` must be provided"));
    }

    #[tokio::test]
    async fn test_non_string_arn_rejected() {
        let mut api = MockSecurityHubApi::new();
        api.expect_describe_hub().never();

        let params = crate::params::ResourceParams::new().with(IDENTITY_PARAM, 42i64);
        let err = SecurityHubHub::load(&api, params).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("`hub_arn` must be a string"));
    }
}
