//! Closed error taxonomy shared by every crate in the workspace.
//!
//! Every variant here is one a caller might actually need to branch on;
//! human-facing detail lives in the `message`/`reason` fields, not in the
//! variant name.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("indexer is behind a Cloudflare challenge: {indexer}")]
    CloudflareProtected { indexer: String },

    #[error("operation timed out after {elapsed_ms}ms: {operation}")]
    Timeout { operation: String, elapsed_ms: u64 },

    #[error("rate limited on {scope}, retry after {wait_ms}ms")]
    RateLimited { scope: String, wait_ms: u64 },

    #[error("unauthorized against {service}")]
    Unauthorized { service: String },

    #[error("download already present: {hash}")]
    DuplicateDownload { hash: String },

    #[error("release categories do not match requested media type: {detail}")]
    CategoryMismatch { detail: String },

    #[error("upgrade rejected: {reason}")]
    UpgradeRejected { reason: String },

    #[error("could not resolve download url: {detail}")]
    ResolutionFailed { detail: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("network error calling {service}: {message}")]
    NetworkError { service: String, message: String },

    #[error("temporary error: {message}")]
    TemporaryError { message: String },

    #[error("{operation} failed after {attempts} attempts: {last_error}")]
    RetryExhausted {
        operation: String,
        attempts: u32,
        #[source]
        last_error: Box<OrchestratorError>,
    },

    #[error("circuit breaker open for {service}")]
    CircuitBreakerOpen { service: String },

    #[error("invalid configuration for {field}: {message}")]
    ConfigurationError { field: String, message: String },

    #[error("validation failed for {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("external service error from {service}: {error}")]
    ExternalServiceError { service: String, error: String },
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
