//! Wire request/response bodies for the backend endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wayplink_types::{DeferredDeeplinkData, DeferredLinkData, DeviceIdentity};

/// Body of the short-link exchange request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExchangeRequest<'a> {
    pub url: &'a str,
}

/// Body of the deferred-deeplink lookup request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeferredLookupRequest {
    pub user_agent: String,
    pub screen_resolution: String,
    pub timezone: String,
    /// Wire name for the device locale.
    pub language: String,
}

impl DeferredLookupRequest {
    pub fn from_identity(identity: &DeviceIdentity) -> Self {
        Self {
            user_agent: identity.user_agent.clone(),
            screen_resolution: identity.screen_resolution.clone(),
            timezone: identity.timezone.clone(),
            language: identity.locale.clone(),
        }
    }
}

/// Body of the install-confirmation request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmInstallRequest {
    pub user_agent: String,
    pub device_model: String,
    pub os_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

impl ConfirmInstallRequest {
    pub fn from_identity(identity: &DeviceIdentity) -> Self {
        Self {
            user_agent: identity.user_agent.clone(),
            device_model: identity.device_model.clone(),
            os_version: identity.os_version.clone(),
            app_version: identity.app_version.clone(),
        }
    }
}

/// Raw backend response to a deferred-deeplink lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredLookupResponse {
    pub found: bool,
    #[serde(default)]
    pub link_data: Option<Map<String, Value>>,
}

impl DeferredLookupResponse {
    /// Project the raw payload into the typed public result.
    ///
    /// `found` without a payload is treated as no match.
    pub fn into_deeplink_data(self) -> DeferredDeeplinkData {
        match (self.found, self.link_data) {
            (true, Some(map)) => DeferredDeeplinkData::found(DeferredLinkData::from_map(map)),
            _ => DeferredDeeplinkData::not_found(),
        }
    }
}
