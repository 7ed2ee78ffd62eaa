//! Integration tests for awsprobe against a live AWS-compatible endpoint
//!
//! These tests need an account (or an emulator such as LocalStack) with
//! API Gateway and Security Hub.
//!
//! Run with:
//! ```bash
//! # Start LocalStack
//! docker run -d --name localstack -p 4566:4566 localstack/localstack
//!
//! # Run tests
//! AWSPROBE_TEST_ENDPOINT=http://localhost:4566 \
//! AWSPROBE_TEST_ACCESS_KEY=test \
//! AWSPROBE_TEST_SECRET_KEY=test \
//!     cargo test --features integration
//! ```
//!
//! Without `AWSPROBE_TEST_ACCESS_KEY` the tests are skipped.

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run awsprobe with an isolated config directory
fn run_awsprobe(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_awsprobe"))
        .args(args)
        .env("AWSPROBE_CONFIG_DIR", config_dir)
        .env_remove("AWSPROBE_PROFILE")
        .output()
        .expect("Failed to execute awsprobe command")
}

/// Test account configuration from the environment
struct TestAccount {
    endpoint: Option<String>,
    region: String,
    access_key: String,
    secret_key: String,
}

fn get_test_account() -> Option<TestAccount> {
    Some(TestAccount {
        endpoint: std::env::var("AWSPROBE_TEST_ENDPOINT").ok(),
        region: std::env::var("AWSPROBE_TEST_REGION").unwrap_or_else(|_| "us-east-1".into()),
        access_key: std::env::var("AWSPROBE_TEST_ACCESS_KEY").ok()?,
        secret_key: std::env::var("AWSPROBE_TEST_SECRET_KEY").ok()?,
    })
}

/// Test helper: configure a default profile for the test account
fn setup_profile() -> Option<TempDir> {
    let account = get_test_account()?;
    let config_dir = tempfile::tempdir().ok()?;

    let mut args = vec![
        "profile",
        "set",
        "test",
        "--region",
        &account.region,
        "--access-key",
        &account.access_key,
        "--secret-key",
        &account.secret_key,
        "--default",
    ];
    if let Some(endpoint) = &account.endpoint {
        args.extend(["--endpoint", endpoint.as_str()]);
    }

    let output = run_awsprobe(&args, config_dir.path());
    if !output.status.success() {
        eprintln!(
            "Failed to set profile: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        return None;
    }

    Some(config_dir)
}

/// Generate unique suffix for identifiers that must not exist
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:x}", duration.as_nanos() % 0xFFFFFFFF)
}

mod describe {
    use super::*;

    #[test]
    fn test_missing_client_certificate() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: AWSPROBE_TEST_ACCESS_KEY not set");
            return;
        };

        let id = format!("missing{}", unique_suffix());
        let output = run_awsprobe(
            &["describe", "aws_apigateway_client_certificate", &id, "--json"],
            config_dir.path(),
        );

        assert_eq!(
            output.status.code(),
            Some(5),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["exists"], false);
        assert_eq!(json["display"], format!("Client Certificate ID: {id}"));
        assert!(json.get("failure").is_none());
    }

    #[test]
    fn test_missing_gateway_response() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: AWSPROBE_TEST_ACCESS_KEY not set");
            return;
        };

        let rest_api_id = format!("none{}", unique_suffix());
        let output = run_awsprobe(
            &[
                "describe",
                "aws_api_gateway_response",
                "-p",
                &format!("rest_api_id={rest_api_id}"),
                "-p",
                "response_type=DEFAULT_4XX",
                "--json",
            ],
            config_dir.path(),
        );

        assert_eq!(
            output.status.code(),
            Some(5),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

mod exec {
    use super::*;

    #[test]
    fn test_controls_expecting_absence_pass() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: AWSPROBE_TEST_ACCESS_KEY not set");
            return;
        };

        let suffix = unique_suffix();
        let controls = config_dir.path().join("controls.toml");
        std::fs::write(
            &controls,
            format!(
                r#"
[[control]]
id = "no-stray-certificate"
resource = "aws_apigateway_client_certificate"
target = "missing{suffix}"
expect = {{ exists = false }}
"#
            ),
        )
        .unwrap();

        let output = run_awsprobe(
            &["exec", controls.to_str().unwrap(), "--json"],
            config_dir.path(),
        );

        assert!(
            output.status.success(),
            "stdout: {} stderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["summary"]["passed"], 1);
        assert_eq!(json["controls"][0]["status"], "passed");
    }
}
