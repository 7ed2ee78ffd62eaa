//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};

use ap_aws::AwsConnector;
use ap_core::{ConfigManager, ProfileManager, ResourceKind};

use crate::exit_code::ExitCode;
use crate::output::{ColorMode, Formatter, OutputConfig};

mod completions;
mod describe;
mod exec;
mod profile;
mod resources;
#[cfg(test)]
mod testing;

/// awsprobe - AWS resource probes
///
/// Inspect AWS resources and check them against declarative controls.
#[derive(Parser, Debug)]
#[command(name = "awsprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Connection profile to use instead of the configured default
    #[arg(long, global = true, env = "AWSPROBE_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe a single resource and show its attributes
    Describe(describe::DescribeArgs),

    /// Run the controls of a control file
    Exec(exec::ExecArgs),

    /// List the supported resource types
    Resources(resources::ResourcesArgs),

    /// Manage connection profiles
    #[command(subcommand)]
    Profile(profile::ProfileCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let mut output_config = OutputConfig {
        json: cli.json,
        color: if cli.no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        },
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => output_config = output_config.with_defaults(&config.defaults),
        Err(e) => tracing::debug!(error = %e, "config defaults not applied"),
    }
    let formatter = Formatter::new(output_config);

    match cli.command {
        Commands::Describe(args) => describe::execute(args, cli.profile.as_deref(), &formatter).await,
        Commands::Exec(args) => exec::execute(args, cli.profile.as_deref(), &formatter).await,
        Commands::Resources(args) => resources::execute(args, &formatter),
        Commands::Profile(cmd) => profile::execute(cmd, &formatter),
        Commands::Completions(args) => completions::execute(args, &formatter),
    }
}

/// Parses a resource type name; the names double as shell completions
pub fn resource_kind_parser() -> impl TypedValueParser<Value = ResourceKind> {
    PossibleValuesParser::new(ResourceKind::ALL.map(ResourceKind::name))
        .try_map(|name| name.parse::<ResourceKind>())
}

/// Build the AWS connector for the selected (or default) profile
pub fn connector(profile: Option<&str>, formatter: &Formatter) -> Result<AwsConnector, ExitCode> {
    let resolved = ProfileManager::new().and_then(|manager| manager.resolve(profile));

    match resolved {
        Ok(profile) => {
            tracing::debug!(
                profile = profile.as_ref().map(|p| p.name.as_str()).unwrap_or("<environment>"),
                "using connection profile"
            );
            Ok(AwsConnector::new(profile))
        }
        Err(ap_core::Error::ProfileNotFound(name)) => {
            formatter.error(&format!("Profile '{name}' not found"));
            Err(ExitCode::NotFound)
        }
        Err(e) => {
            formatter.error(&format!("Failed to load profiles: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_describe_with_params() {
        let cli = Cli::try_parse_from([
            "awsprobe",
            "--json",
            "describe",
            "aws_api_gateway_response",
            "-p",
            "rest_api_id=a1b2c3",
            "-p",
            "response_type=DEFAULT_4XX",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Describe(args) => {
                assert_eq!(args.resource, ResourceKind::ApiGatewayResponse);
                assert_eq!(args.params.len(), 2);
                assert!(args.target.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_resource_rejected_by_parser() {
        let err = Cli::try_parse_from(["awsprobe", "describe", "aws_s3_bucket"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_parse_global_profile_flag() {
        let cli = Cli::try_parse_from([
            "awsprobe",
            "exec",
            "controls.toml",
            "--profile",
            "prod",
        ])
        .unwrap();
        assert_eq!(cli.profile.as_deref(), Some("prod"));
    }
}
