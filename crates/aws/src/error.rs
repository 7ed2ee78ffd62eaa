//! SDK error classification
//!
//! Maps AWS SDK errors onto `ap_core::Error` by their error code, so the
//! resource base can tell a missing resource from a denied or failed call.

use ap_core::Error;
// Every service crate re-exports the same smithy `SdkError`.
use aws_sdk_apigateway::error::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;

/// Convert an SDK error, prefixing `context` to the message
pub(crate) fn from_sdk_error<E, R>(err: SdkError<E, R>, context: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = format!("{context}: {}", DisplayErrorContext(&err));

    match &err {
        SdkError::ServiceError(_) | SdkError::ResponseError(_) => {
            classify_code(err.code(), err.message(), detail)
        }
        _ if mentions_credentials(&detail) => Error::MissingCredentials(detail),
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => Error::Network(detail),
        _ => Error::General(detail),
    }
}

fn mentions_credentials(detail: &str) -> bool {
    let lower = detail.to_ascii_lowercase();
    lower.contains("no credentials")
        || lower.contains("credentials provider")
        || lower.contains("failed to load credentials")
        || lower.contains("credential provider")
}

/// Classify a service error by its AWS error code
pub(crate) fn classify_code(code: Option<&str>, message: Option<&str>, detail: String) -> Error {
    match code {
        Some("NotFoundException" | "ResourceNotFoundException") => Error::NotFound(detail),
        // Security Hub answers this when the account has no hub
        Some("InvalidAccessException") => Error::NotFound(detail),
        Some(
            "AccessDeniedException"
            | "AccessDenied"
            | "UnauthorizedException"
            | "UnauthorizedOperation"
            | "UnrecognizedClientException"
            | "InvalidClientTokenId"
            | "InvalidSignatureException"
            | "SignatureDoesNotMatch"
            | "ExpiredTokenException"
            | "MissingAuthenticationTokenException",
        ) => Error::Auth(detail),
        Some(
            "TooManyRequestsException"
            | "ThrottlingException"
            | "Throttling"
            | "LimitExceededException",
        ) => Error::Throttled(detail),
        Some(code) => Error::Service {
            code: code.to_string(),
            message: message.map(str::to_string).unwrap_or(detail),
        },
        None => Error::General(detail),
    }
}
