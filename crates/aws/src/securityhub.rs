//! Security Hub client
//!
//! Wraps aws-sdk-securityhub and implements the SecurityHubApi trait from ap-core.

use async_trait::async_trait;
use aws_sdk_securityhub::operation::describe_hub::DescribeHubOutput;

use ap_core::{Hub, Result, SecurityHubApi};

use crate::error::from_sdk_error;

/// Security Hub client wrapper
pub struct SecurityHubClient {
    inner: aws_sdk_securityhub::Client,
}

impl SecurityHubClient {
    pub fn new(inner: aws_sdk_securityhub::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SecurityHubApi for SecurityHubClient {
    async fn describe_hub(&self, hub_arn: &str) -> Result<Hub> {
        let response = self
            .inner
            .describe_hub()
            .hub_arn(hub_arn)
            .send()
            .await
            .map_err(|e| from_sdk_error(e, &format!("DescribeHub {hub_arn}")))?;

        Ok(hub(&response))
    }
}

fn hub(output: &DescribeHubOutput) -> Hub {
    Hub {
        hub_arn: output.hub_arn().map(str::to_string),
        subscribed_at: output.subscribed_at().map(str::to_string),
        auto_enable_controls: output.auto_enable_controls(),
        control_finding_generator: output
            .control_finding_generator()
            .map(|g| g.as_str().to_string()),
    }
}
