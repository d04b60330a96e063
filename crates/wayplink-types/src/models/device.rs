//! Device identity snapshot.

use serde::{Deserialize, Serialize};

/// Device identity signals gathered on demand from the host platform.
///
/// No fingerprint hash is computed or transmitted by the SDK; the backend
/// performs identity matching from these signals plus transport-layer
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentity {
    pub user_agent: String,
    /// Screen resolution as `WIDTHxHEIGHT`, e.g. `1170x2532`.
    pub screen_resolution: String,
    /// IANA timezone name, e.g. `Europe/Berlin`.
    pub timezone: String,
    /// BCP 47 locale tag, e.g. `de-DE`.
    pub locale: String,
    pub device_model: String,
    pub os_version: String,
    pub app_version: Option<String>,
}
