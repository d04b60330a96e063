//! Unified error types for the Wayplink SDK.

use serde::Serialize;
use thiserror::Error;

/// Main error type for all Wayplink operations.
///
/// Validation and configuration failures are fail-fast and surfaced to the
/// caller of `initialize`/`resolve`/`shorten`. Deferred-deeplink operations
/// never surface these; they degrade to a sentinel result at the
/// coordinator boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WayplinkError {
    /// An operation was invoked before `initialize` completed.
    #[error("Wayplink SDK is not initialized")]
    NotInitialized,

    /// Configuration rejected at initialization (blank base URL or API key).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The URI is not a recognized attribution link, or the backend rejected
    /// it without a classifiable error.
    #[error("Invalid dynamic link: {0}")]
    InvalidLink(String),

    /// No project id was supplied and none is configured.
    #[error("Project id is not set; pass one explicitly or configure a default")]
    ProjectIdNotSet,

    /// Backend-classified failure, passed through verbatim.
    #[error("Backend error ({status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// Transport-level failure (connect, TLS, body read) before any backend
    /// classification was possible.
    #[error("Network error: {0}")]
    Network(String),
}

impl Serialize for WayplinkError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for Wayplink operations.
pub type Result<T> = std::result::Result<T, WayplinkError>;
