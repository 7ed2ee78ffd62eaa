//! ap-core: Core library for awsprobe
//!
//! This crate provides the core functionality for awsprobe, including:
//! - Configuration and connection profile management
//! - Resource parameters and their validation
//! - The resource base and the individual resource probes
//! - Service API traits the probes call through
//! - Declarative compliance controls
//!
//! This crate is designed to be independent of the AWS SDK,
//! allowing the probes to be tested against mocked service APIs.

pub mod api;
pub mod config;
pub mod control;
pub mod error;
pub mod params;
pub mod profile;
pub mod record;
pub mod registry;
pub mod resource;
pub mod resources;

pub use api::{ApiGatewayApi, ClientCertificate, Connector, GatewayResponse, Hub, SecurityHubApi};
pub use config::{Config, ConfigManager};
pub use control::{Control, ControlFile, ControlResult, ControlStatus, RunSummary, run_controls};
pub use error::{Error, Result};
pub use params::{ConnectionOptions, ParamValue, ResourceInput, ResourceParams};
pub use profile::{CredentialSource, Profile, ProfileManager, RetryConfig, TimeoutConfig};
pub use record::ResourceRecord;
pub use registry::{ResourceKind, load_resource};
pub use resource::Resource;
