//! resources command - List supported resource types

use clap::Args;
use serde::Serialize;

use ap_core::ResourceKind;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List supported resource types
#[derive(Args, Debug)]
pub struct ResourcesArgs {
    /// Show an example control for this resource type
    #[arg(long, value_name = "RESOURCE", value_parser = super::resource_kind_parser())]
    pub example: Option<ResourceKind>,
}

#[derive(Debug, Serialize)]
struct ResourceInfo {
    name: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<&'static str>,
}

impl From<ResourceKind> for ResourceInfo {
    fn from(kind: ResourceKind) -> Self {
        Self {
            name: kind.name(),
            description: kind.description(),
            identity: kind.scalar_param(),
        }
    }
}

/// Execute the resources command
pub fn execute(args: ResourcesArgs, formatter: &Formatter) -> ExitCode {
    match args.example {
        Some(kind) => show_example(kind, formatter),
        None => list(formatter),
    }
}

fn list(formatter: &Formatter) -> ExitCode {
    let resources: Vec<ResourceInfo> = ResourceKind::ALL.into_iter().map(Into::into).collect();

    if formatter.is_json() {
        formatter.json(&serde_json::json!({ "resources": resources }));
        return ExitCode::Success;
    }

    let mut table = formatter.new_table(["RESOURCE", "IDENTITY", "DESCRIPTION"]);
    for info in &resources {
        table.add_row([info.name, info.identity.unwrap_or("-"), info.description]);
    }
    formatter.table(&table);
    ExitCode::Success
}

fn show_example(kind: ResourceKind, formatter: &Formatter) -> ExitCode {
    let example = example_control(kind);
    if formatter.is_json() {
        formatter.json(&serde_json::json!({ "resource": kind.name(), "example": example }));
    } else {
        formatter.println(&example);
    }
    ExitCode::Success
}

fn example_control(kind: ResourceKind) -> String {
    format!("[[control]]\nid = \"{}-example\"\n{}\n", kind.name(), kind.example())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_info() {
        let info = ResourceInfo::from(ResourceKind::SecurityHubHub);
        assert_eq!(info.name, "aws_securityhub_hub");
        assert_eq!(info.identity, Some("hub_arn"));

        let info = ResourceInfo::from(ResourceKind::ApiGatewayResponse);
        assert!(info.identity.is_none());
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("identity").is_none());
    }

    #[test]
    fn test_examples_are_valid_controls() {
        for kind in ResourceKind::ALL {
            let file = ap_core::ControlFile::parse(&example_control(kind))
                .unwrap_or_else(|e| panic!("{kind}: {e}"));
            assert_eq!(file.controls.len(), 1);
            assert_eq!(file.controls[0].kind().unwrap(), kind);
        }
    }

    #[test]
    fn test_show_example_quiet() {
        let formatter = Formatter::new(crate::output::OutputConfig {
            quiet: true,
            ..Default::default()
        });
        assert_eq!(
            show_example(ResourceKind::ApiGatewayClientCertificate, &formatter),
            ExitCode::Success
        );
    }
}
