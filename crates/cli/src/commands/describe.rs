//! describe command - Probe one resource
//!
//! Loads a single resource and prints whether it exists together with every
//! attribute of the AWS response.

use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use ap_core::{
    Connector, ParamValue, ResourceInput, ResourceKind, ResourceParams, load_resource,
};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Probe a single resource
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Resource type (see `awsprobe resources`)
    #[arg(value_parser = super::resource_kind_parser())]
    pub resource: ResourceKind,

    /// Identifier for resources that accept one (e.g. a hub ARN)
    pub target: Option<String>,

    /// Resource parameter, repeatable
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,
}

fn parse_param(pair: &str) -> Result<(String, ParamValue), String> {
    ResourceParams::parse_pair(pair).map_err(|e| e.to_string())
}

/// What `describe` reports about a resource
#[derive(Debug, Serialize)]
pub(crate) struct DescribeOutput {
    resource: &'static str,
    id: String,
    display: String,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
    attributes: Map<String, Value>,
}

impl DescribeOutput {
    fn exit_code(&self) -> ExitCode {
        if self.failure.is_some() {
            ExitCode::GeneralError
        } else if self.exists {
            ExitCode::Success
        } else {
            ExitCode::NotFound
        }
    }
}

/// Execute the describe command
pub async fn execute(args: DescribeArgs, profile: Option<&str>, formatter: &Formatter) -> ExitCode {
    let kind = args.resource;
    let connector = match super::connector(profile, formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let input = match build_input(kind, args.target, args.params.into_iter().collect()) {
        Ok(input) => input,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };
    let spinner = ProgressBar::spinner(formatter.config(), &format!("Probing {kind}"));
    let result = describe(kind, input, &connector).await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            render(&output, formatter);
            output.exit_code()
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

/// Combine the positional target with `-p` parameters.
///
/// A target plus parameters folds the target into the resource's identity
/// parameter; resources without one get the bare scalar and reject it.
/// A target and an explicit identity parameter together are rejected.
fn build_input(
    kind: ResourceKind,
    target: Option<String>,
    mut params: ResourceParams,
) -> ap_core::Result<ResourceInput> {
    let input = match target {
        None => ResourceInput::Params(params),
        Some(target) if params.is_empty() => ResourceInput::Scalar(target),
        Some(target) => match kind.scalar_param() {
            Some(key) if params.get(key).is_some() => {
                return Err(ap_core::Error::InvalidParameter(format!(
                    "{kind}: target '{target}' conflicts with -p {key}"
                )));
            }
            Some(key) => {
                params.insert(key, target);
                ResourceInput::Params(params)
            }
            None => ResourceInput::Scalar(target),
        },
    };
    Ok(input)
}

pub(crate) async fn describe(
    kind: ResourceKind,
    input: ResourceInput,
    connector: &dyn Connector,
) -> ap_core::Result<DescribeOutput> {
    let resource = load_resource(kind, input, connector).await?;

    Ok(DescribeOutput {
        resource: resource.resource_name(),
        id: resource.resource_id(),
        display: resource.to_string(),
        exists: resource.exists(),
        failure: resource.failure().map(str::to_string),
        attributes: resource
            .record()
            .map(|r| r.as_map().clone())
            .unwrap_or_default(),
    })
}

fn render(output: &DescribeOutput, formatter: &Formatter) {
    if formatter.is_json() {
        formatter.json(output);
        return;
    }

    let status = match (&output.failure, output.exists) {
        (Some(_), _) => formatter.style_fail("failed"),
        (None, true) => formatter.style_pass("exists"),
        (None, false) => formatter.style_dim("does not exist"),
    };
    formatter.println(&format!(
        "{}  {}",
        formatter.style_name(&output.display),
        status
    ));

    if let Some(failure) = &output.failure {
        formatter.error(failure);
        return;
    }
    if output.attributes.is_empty() {
        return;
    }

    let mut table = formatter.new_table(["ATTRIBUTE", "VALUE"]);
    for (name, value) in &output.attributes {
        table.add_row([name.clone(), display_value(value)]);
    }
    formatter.table(&table);
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{self, FakeAws};

    fn params(pairs: &[(&str, &str)]) -> ResourceParams {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[tokio::test]
    async fn test_describe_gateway_response_snapshot() {
        let aws = testing::account();
        let input = ResourceInput::Params(params(&[
            ("rest_api_id", "a1b2c3"),
            ("response_type", "DEFAULT_4XX"),
        ]));

        let output = describe(ResourceKind::ApiGatewayResponse, input, &aws)
            .await
            .unwrap();

        assert_eq!(output.exit_code(), ExitCode::Success);
        insta::with_settings!({ sort_maps => true }, {
            insta::assert_json_snapshot!(output, @r#"
            {
              "attributes": {
                "default_response": false,
                "response_parameters": {
                  "gatewayresponse.header.Access-Control-Allow-Origin": "'*'"
                },
                "response_type": "DEFAULT_4XX",
                "status_code": "403"
              },
              "display": "Response Type: DEFAULT_4XX",
              "exists": true,
              "id": "a1b2c3/DEFAULT_4XX",
              "resource": "aws_api_gateway_response"
            }
            "#);
        });
    }

    #[tokio::test]
    async fn test_describe_missing_hub() {
        let aws = FakeAws::default();
        let input = build_input(
            ResourceKind::SecurityHubHub,
            Some("arn:aws:securityhub:eu-west-1:123456789012:hub/default".into()),
            ResourceParams::new(),
        )
        .unwrap();

        let output = describe(ResourceKind::SecurityHubHub, input, &aws).await.unwrap();
        assert!(!output.exists);
        assert!(output.failure.is_none());
        assert!(output.attributes.is_empty());
        assert_eq!(output.exit_code(), ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_describe_denied_is_failure() {
        let aws = FakeAws {
            deny: Some("not authorized to perform: apigateway:GET".into()),
            ..Default::default()
        };
        let input = ResourceInput::Scalar("9ktqab".into());

        let output = describe(ResourceKind::ApiGatewayClientCertificate, input, &aws)
            .await
            .unwrap();
        assert!(!output.exists);
        assert!(output.failure.as_deref().unwrap().contains("Access denied"));
        assert_eq!(output.exit_code(), ExitCode::GeneralError);
    }

    #[tokio::test]
    async fn test_describe_invalid_params_is_error() {
        let aws = testing::account();
        let input = ResourceInput::Params(params(&[("rest_api_id", "a1b2c3")]));

        let err = describe(ResourceKind::ApiGatewayResponse, input, &aws)
            .await
            .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::UsageError);
    }

    #[test]
    fn test_build_input_folds_target_into_identity() {
        let input = build_input(
            ResourceKind::SecurityHubHub,
            Some("arn:hub".into()),
            params(&[("aws_region", "eu-west-1")]),
        )
        .unwrap();
        let ResourceInput::Params(params) = input else {
            panic!("expected named parameters");
        };
        assert_eq!(params.get_str("hub_arn"), Some("arn:hub"));
        assert_eq!(params.get_str("aws_region"), Some("eu-west-1"));
    }

    #[test]
    fn test_build_input_scalar_without_identity() {
        let input = build_input(
            ResourceKind::ApiGatewayResponse,
            Some("DEFAULT_4XX".into()),
            params(&[("rest_api_id", "a1b2c3")]),
        )
        .unwrap();
        assert_eq!(input, ResourceInput::Scalar("DEFAULT_4XX".into()));
    }

    #[test]
    fn test_build_input_target_conflicts_with_identity_param() {
        let err = build_input(
            ResourceKind::ApiGatewayClientCertificate,
            Some("9ktqab".into()),
            params(&[("client_certificate_id", "other")]),
        )
        .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::UsageError);
        assert!(err.to_string().contains("conflicts with -p client_certificate_id"));
    }

    #[test]
    fn test_parse_param() {
        let (key, value) = parse_param("rest_api_id=a1b2c3").unwrap();
        assert_eq!(key, "rest_api_id");
        assert_eq!(value.as_str(), Some("a1b2c3"));
        assert!(parse_param("rest_api_id").is_err());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::String("403".into())), "403");
        assert_eq!(display_value(&Value::Bool(false)), "false");
    }
}
