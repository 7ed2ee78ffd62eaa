//! exec command - Run a control file
//!
//! Every selected control is evaluated in file order. A control whose
//! resource cannot be loaded is reported as an error and the run continues.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use ap_core::{ControlFile, ControlResult, ControlStatus, RunSummary, run_controls};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Run the controls of a control file
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Path to a TOML control file
    pub file: PathBuf,

    /// Only run the control with this id, repeatable
    #[arg(long = "control", value_name = "ID")]
    pub controls: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ExecOutput<'a> {
    controls: &'a [ControlResult],
    summary: RunSummary,
}

/// Execute the exec command
pub async fn execute(args: ExecArgs, profile: Option<&str>, formatter: &Formatter) -> ExitCode {
    let file = match load_controls(&args.file) {
        Ok(file) => file,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            return load_error_code(&e);
        }
    };

    let selected = match file.select(&args.controls) {
        Ok(selected) => selected,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    if selected.is_empty() {
        formatter.warning(&format!("{} contains no controls", args.file.display()));
    }

    let connector = match super::connector(profile, formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    tracing::info!(file = %args.file.display(), controls = selected.len(), "running controls");
    let progress = ProgressBar::new(formatter.config(), selected.len() as u64);
    let results = run_controls(selected, &connector, |result| {
        progress.set_message(&result.id);
        progress.inc(1);
    })
    .await;
    progress.finish_and_clear();

    let summary = RunSummary::from_results(&results);
    render(&results, summary, formatter);

    if summary.all_passed() {
        ExitCode::Success
    } else {
        ExitCode::ControlsFailed
    }
}

fn load_controls(path: &Path) -> anyhow::Result<ControlFile> {
    ControlFile::load(path)
        .with_context(|| format!("Failed to load control file {}", path.display()))
}

fn load_error_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ap_core::Error>() {
        Some(ap_core::Error::Io(io)) if io.kind() == std::io::ErrorKind::NotFound => {
            ExitCode::NotFound
        }
        Some(ap_core::Error::Io(_)) | None => ExitCode::GeneralError,
        Some(_) => ExitCode::UsageError,
    }
}

fn render(results: &[ControlResult], summary: RunSummary, formatter: &Formatter) {
    if formatter.is_json() {
        formatter.json(&ExecOutput {
            controls: results,
            summary,
        });
        return;
    }

    for result in results {
        let marker = match result.status {
            ControlStatus::Passed => formatter.style_pass("✓"),
            ControlStatus::Failed => formatter.style_fail("✗"),
            ControlStatus::Error => formatter.style_fail("!"),
        };
        let title = result
            .title
            .as_deref()
            .map(|t| format!(": {t}"))
            .unwrap_or_default();
        formatter.println(&format!(
            "{marker} {}{title}  {}",
            formatter.style_name(&result.id),
            formatter.style_dim(&result.resource)
        ));
        for message in &result.messages {
            formatter.println(&format!("    {message}"));
        }
    }

    formatter.println("");
    formatter.println(&summary_line(summary));
}

fn summary_line(summary: RunSummary) -> String {
    format!(
        "{} passed, {} failed, {} errors",
        summary.passed, summary.failed, summary.errors
    )
}
