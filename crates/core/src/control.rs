//! Compliance controls
//!
//! A control file declares which resources to probe and what to expect of
//! them. Controls are evaluated one after another; a control that cannot be
//! evaluated is reported as an error without stopping the run.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Connector;
use crate::error::{Error, Result};
use crate::params::{ResourceInput, ResourceParams};
use crate::registry::{ResourceKind, load_resource};
use crate::resource::Resource;

/// A parsed control file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlFile {
    #[serde(default, rename = "control")]
    pub controls: Vec<Control>,
}

/// A single control
#[derive(Debug, Clone, Deserialize)]
pub struct Control {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Severity between 0.0 and 1.0
    #[serde(default)]
    pub impact: Option<f64>,

    /// Resource type name
    pub resource: String,

    /// Scalar identifier, for resources that accept one
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub params: ResourceParams,

    #[serde(default)]
    pub expect: Expectations,
}

/// What a control expects of its resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Expectations {
    #[serde(default)]
    pub exists: Option<bool>,

    /// Expected attribute values keyed by (dotted) attribute name
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

/// Outcome of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    Passed,
    Failed,
    Error,
}

/// Result of evaluating one control
#[derive(Debug, Clone, Serialize)]
pub struct ControlResult {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,

    /// `Display` of the probed resource, or the resource type if it never loaded
    pub resource: String,

    pub status: ControlStatus,

    pub messages: Vec<String>,
}

/// Tally of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ControlResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                ControlStatus::Passed => acc.passed += 1,
                ControlStatus::Failed => acc.failed += 1,
                ControlStatus::Error => acc.errors += 1,
            }
            acc
        })
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl ControlFile {
    /// Load and validate a control file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate control file content
    pub fn parse(content: &str) -> Result<Self> {
        let file: ControlFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    /// Pick controls by id, keeping file order; no ids selects all
    pub fn select(&self, ids: &[String]) -> Result<Vec<&Control>> {
        if let Some(unknown) = ids.iter().find(|id| !self.controls.iter().any(|c| &c.id == *id)) {
            return Err(Error::InvalidControl(format!("no control with id {unknown}")));
        }
        Ok(self
            .controls
            .iter()
            .filter(|c| ids.is_empty() || ids.contains(&c.id))
            .collect())
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for control in &self.controls {
            if control.id.trim().is_empty() {
                return Err(Error::InvalidControl("control id cannot be empty".into()));
            }
            if !seen.insert(control.id.as_str()) {
                return Err(Error::InvalidControl(format!(
                    "duplicate control id: {}",
                    control.id
                )));
            }
            let kind = control.kind()?;
            if let Some(impact) = control.impact
                && !(0.0..=1.0).contains(&impact)
            {
                return Err(Error::InvalidControl(format!(
                    "{}: impact must be between 0.0 and 1.0",
                    control.id
                )));
            }
            if control.target.is_some() && !control.params.is_empty() {
                return Err(Error::InvalidControl(format!(
                    "{}: use either target or params, not both",
                    control.id
                )));
            }
            if control.target.is_some() && kind.scalar_param().is_none() {
                return Err(Error::InvalidControl(format!(
                    "{}: {kind} does not accept a target",
                    control.id
                )));
            }
        }
        Ok(())
    }
}

impl Control {
    pub fn kind(&self) -> Result<ResourceKind> {
        self.resource
            .parse()
            .map_err(|_| Error::InvalidControl(format!("{}: unknown resource {}", self.id, self.resource)))
    }

    pub fn input(&self) -> ResourceInput {
        match &self.target {
            Some(target) => ResourceInput::Scalar(target.clone()),
            None => ResourceInput::Params(self.params.clone()),
        }
    }

    /// Check a loaded resource against this control's expectations
    pub fn evaluate(&self, resource: &dyn Resource) -> ControlResult {
        let mut messages = Vec::new();

        let status = if let Some(failure) = resource.failure() {
            messages.push(failure.to_string());
            ControlStatus::Error
        } else {
            let exists = resource.exists();
            let mut ok = true;

            if let Some(expected) = self.expect.exists
                && expected != exists
            {
                ok = false;
                messages.push(if expected {
                    format!("expected {resource} to exist")
                } else {
                    format!("expected {resource} not to exist")
                });
            }

            for (path, expected) in &self.expect.attributes {
                match resource.attribute(path) {
                    Some(actual) if actual == expected => {}
                    Some(actual) => {
                        ok = false;
                        messages.push(format!("{path}: expected {expected}, got {actual}"));
                    }
                    None if !exists => {
                        ok = false;
                        messages.push(format!("{path}: {resource} does not exist"));
                    }
                    None => {
                        ok = false;
                        messages.push(format!("{path}: expected {expected}, attribute not present"));
                    }
                }
            }

            if ok {
                ControlStatus::Passed
            } else {
                ControlStatus::Failed
            }
        };

        ControlResult {
            id: self.id.clone(),
            title: self.title.clone(),
            impact: self.impact,
            resource: resource.to_string(),
            status,
            messages,
        }
    }

    fn error(&self, err: &Error) -> ControlResult {
        ControlResult {
            id: self.id.clone(),
            title: self.title.clone(),
            impact: self.impact,
            resource: self.resource.clone(),
            status: ControlStatus::Error,
            messages: vec![err.to_string()],
        }
    }

    /// Load the control's resource and evaluate it
    pub async fn run(&self, connector: &dyn Connector) -> ControlResult {
        let kind = match self.kind() {
            Ok(kind) => kind,
            Err(e) => return self.error(&e),
        };

        match load_resource(kind, self.input(), connector).await {
            Ok(resource) => self.evaluate(resource.as_ref()),
            Err(e) => {
                tracing::debug!(control = %self.id, error = %e, "failed to load resource");
                self.error(&e)
            }
        }
    }
}

/// Run controls in order, reporting each result as it completes
pub async fn run_controls<'a, I, F>(
    controls: I,
    connector: &dyn Connector,
    mut on_result: F,
) -> Vec<ControlResult>
where
    I: IntoIterator<Item = &'a Control>,
    F: FnMut(&ControlResult),
{
    let mut results = Vec::new();
    for control in controls {
        let result = control.run(connector).await;
        on_result(&result);
        results.push(result);
    }
    results
}
