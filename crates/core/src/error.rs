//! Error types for ap-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for ap-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ap-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource parameters failed validation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Control file is malformed or references an unknown resource
    #[error("Invalid control: {0}")]
    InvalidControl(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No credentials could be resolved for the AWS call
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Authentication or authorization failure
    #[error("Access denied: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Request rate exceeded
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Any other error reported by the AWS service
    #[error("Service error {code}: {message}")]
    Service { code: String, message: String },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidParameter(_) | Error::InvalidControl(_) => 2, // UsageError
            Error::Config(_) | Error::InvalidUrl(_) => 2,               // UsageError
            Error::Network(_) | Error::Throttled(_) => 3,               // NetworkError
            Error::Auth(_) | Error::MissingCredentials(_) => 4,         // AuthError
            Error::NotFound(_) | Error::ProfileNotFound(_) => 5,        // NotFound
            _ => 1,                                                     // GeneralError
        }
    }

    /// Whether this error came back from an AWS call rather than local input
    pub const fn is_aws_error(&self) -> bool {
        matches!(
            self,
            Error::MissingCredentials(_)
                | Error::Auth(_)
                | Error::NotFound(_)
                | Error::Network(_)
                | Error::Throttled(_)
                | Error::Service { .. }
        )
    }
}
