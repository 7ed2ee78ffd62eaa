//! Profile management commands
//!
//! Profiles are named AWS connection settings: region, endpoint override
//! and where credentials come from.

use clap::Subcommand;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;
use ap_core::{CredentialSource, Profile, ProfileManager, RetryConfig};

/// Profile subcommands for managing AWS connections
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add or update a profile
    Set(SetArgs),

    /// List all configured profiles
    List(ListArgs),

    /// Remove a profile
    Remove(RemoveArgs),

    /// Make a profile the default
    Default(DefaultArgs),
}

/// Arguments for the `profile set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Profile name (e.g., "prod", "localstack")
    pub name: String,

    /// AWS region
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Endpoint URL override (e.g., "http://localhost:4566")
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, conflicts_with_all = ["access_key", "secret_key"])]
    pub aws_profile: Option<String>,

    /// Static access key ID
    #[arg(long, requires = "secret_key")]
    pub access_key: Option<String>,

    /// Static secret access key
    #[arg(long, requires = "access_key")]
    pub secret_key: Option<String>,

    /// Session token for temporary credentials
    #[arg(long, requires = "access_key")]
    pub session_token: Option<String>,

    /// Number of retries after the first attempt
    #[arg(long)]
    pub retry_limit: Option<u32>,

    /// Also make this the default profile
    #[arg(long = "default")]
    pub make_default: bool,
}

/// Arguments for the `profile list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including endpoints and credential source
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `profile remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the profile to remove
    pub name: String,
}

/// Arguments for the `profile default` command
#[derive(clap::Args, Debug)]
pub struct DefaultArgs {
    /// Name of the profile to use by default
    pub name: String,
}

/// JSON output for profile list
#[derive(Serialize)]
struct ProfileListOutput {
    profiles: Vec<ProfileInfo>,
}

/// Profile information for output (without secrets)
#[derive(Debug, Serialize)]
struct ProfileInfo {
    name: String,
    region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    credentials: String,
    default: bool,
}

impl ProfileInfo {
    fn new(profile: &Profile, default: Option<&str>) -> Self {
        let credentials = match profile.credential_source() {
            CredentialSource::Static { .. } => "static".to_string(),
            CredentialSource::SharedProfile(name) => format!("aws profile {name}"),
            CredentialSource::DefaultChain => "default chain".to_string(),
        };
        Self {
            name: profile.name.clone(),
            region: profile.region.clone(),
            endpoint: profile.endpoint.clone(),
            credentials,
            default: default == Some(profile.name.as_str()),
        }
    }
}

/// JSON output for profile set/remove/default operations
#[derive(Serialize)]
struct ProfileOperationOutput {
    success: bool,
    profile: String,
    message: String,
}

/// Execute a profile subcommand
pub fn execute(cmd: ProfileCommands, formatter: &Formatter) -> ExitCode {
    let manager = match ProfileManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to open configuration: {e}"));
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        ProfileCommands::Set(args) => execute_set(args, &manager, formatter),
        ProfileCommands::List(args) => execute_list(args, &manager, formatter),
        ProfileCommands::Remove(args) => execute_remove(args, &manager, formatter),
        ProfileCommands::Default(args) => execute_default(args, &manager, formatter),
    }
}

fn profile_from_args(args: SetArgs) -> Profile {
    let mut profile = Profile::new(args.name, args.region);
    profile.endpoint = args.endpoint;
    profile.aws_profile = args.aws_profile;
    profile.access_key = args.access_key;
    profile.secret_key = args.secret_key;
    profile.session_token = args.session_token;
    profile.retry = args.retry_limit.map(|limit| RetryConfig {
        max_attempts: limit.saturating_add(1),
        ..Default::default()
    });
    profile
}

fn report(formatter: &Formatter, name: &str, message: String) {
    if formatter.is_json() {
        formatter.json(&ProfileOperationOutput {
            success: true,
            profile: name.to_string(),
            message,
        });
    } else {
        formatter.success(&message);
    }
}

fn execute_set(args: SetArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let make_default = args.make_default;
    let profile = profile_from_args(args);
    let name = profile.name.clone();

    if let Err(e) = manager.set(profile) {
        formatter.error(&e.to_string());
        return ExitCode::from_error(&e);
    }
    if make_default && let Err(e) = manager.set_default(&name) {
        formatter.error(&e.to_string());
        return ExitCode::from_error(&e);
    }

    report(formatter, &name, format!("Profile '{name}' configured successfully"));
    ExitCode::Success
}

fn execute_list(args: ListArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let (profiles, default) = match manager
        .list()
        .and_then(|profiles| Ok((profiles, manager.resolve(None)?)))
    {
        Ok((profiles, default)) => (profiles, default.map(|p| p.name)),
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let infos: Vec<ProfileInfo> = profiles
        .iter()
        .map(|p| ProfileInfo::new(p, default.as_deref()))
        .collect();

    if formatter.is_json() {
        formatter.json(&ProfileListOutput { profiles: infos });
    } else if infos.is_empty() {
        formatter.println("No profiles configured.");
    } else if args.long {
        let mut table = formatter.new_table(["", "NAME", "REGION", "ENDPOINT", "CREDENTIALS"]);
        for info in &infos {
            table.add_row([
                if info.default { "*" } else { "" }.to_string(),
                info.name.clone(),
                info.region.clone(),
                info.endpoint.clone().unwrap_or_else(|| "-".to_string()),
                info.credentials.clone(),
            ]);
        }
        formatter.table(&table);
    } else {
        for info in &infos {
            let marker = if info.default { "*" } else { " " };
            formatter.println(&format!("{marker} {:<12} {}", info.name, info.region));
        }
    }
    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            report(
                formatter,
                &args.name,
                format!("Profile '{}' removed successfully", args.name),
            );
            ExitCode::Success
        }
        Err(ap_core::Error::ProfileNotFound(_)) => {
            formatter.error(&format!("Profile '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

fn execute_default(args: DefaultArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match manager.set_default(&args.name) {
        Ok(()) => {
            report(
                formatter,
                &args.name,
                format!("Profile '{}' is now the default", args.name),
            );
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}
