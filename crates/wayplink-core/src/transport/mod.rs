//! Backend transport seam.
//!
//! The SDK talks to the backend through the [`Transport`] trait; the default
//! implementation is [`HttpTransport`] over reqwest. Hosts inject their own
//! transport to control TLS policy, timeouts, and retries.

mod http;
mod wire;

use async_trait::async_trait;
use wayplink_types::{
    DynamicLink, DynamicLinkComponents, DynamicLinkShortenResponse, WayplinkConfig, WayplinkError,
};

pub use http::HttpTransport;
pub use wire::{ConfirmInstallRequest, DeferredLookupRequest, DeferredLookupResponse};

/// Header carrying the configured API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Header identifying the SDK wire-schema version.
pub const SCHEMA_VERSION_HEADER: &str = "X-Wayplink-Schema-Version";
/// Current wire-schema version.
pub const SCHEMA_VERSION: &str = "1";

/// Request/response exchange with the Wayplink backend.
///
/// Retry policy, timeouts, and cancellation belong to implementations; the
/// SDK core never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Exchange a validated short link for its canonical target.
    async fn exchange_short_link(
        &self,
        config: &WayplinkConfig,
        uri: &str,
    ) -> Result<DynamicLink, WayplinkError>;

    /// Create a short link scoped to `project_id`.
    async fn shorten_url(
        &self,
        config: &WayplinkConfig,
        project_id: &str,
        components: &DynamicLinkComponents,
    ) -> Result<DynamicLinkShortenResponse, WayplinkError>;

    /// Look up pre-install attribution context for this device.
    async fn get_deferred_deeplink(
        &self,
        config: &WayplinkConfig,
        request: &DeferredLookupRequest,
    ) -> Result<DeferredLookupResponse, WayplinkError>;

    /// Acknowledge the install after a successful attribution match.
    async fn confirm_install(
        &self,
        config: &WayplinkConfig,
        request: &ConfirmInstallRequest,
    ) -> Result<(), WayplinkError>;
}
