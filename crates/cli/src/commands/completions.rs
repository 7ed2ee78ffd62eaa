//! completions command - Shell completion scripts
//!
//! Resource type names are possible values of `describe` and
//! `resources --example`, so the generated scripts complete them too.

use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;

use super::Cli;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Generate shell completions
pub fn execute(args: CompletionsArgs, formatter: &Formatter) -> ExitCode {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    let Some(dir) = args.dir else {
        clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
        return ExitCode::Success;
    };

    match clap_complete::generate_to(args.shell, &mut cmd, name, &dir) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "wrote completion script");
            if formatter.is_json() {
                formatter.json(&serde_json::json!({ "shell": args.shell.to_string(), "path": path }));
            } else {
                formatter.success(&format!("Wrote {}", path.display()));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to write completions to {}: {e}", dir.display()));
            ExitCode::GeneralError
        }
    }
}
