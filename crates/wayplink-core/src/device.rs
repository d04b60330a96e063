//! Device identity collaborator.
//!
//! The host platform knows what device it runs on; the SDK only defines the
//! contract. Identity is gathered on demand for each deferred-deeplink
//! lookup and install confirmation; no caching contract is implied.

use wayplink_types::DeviceIdentity;

/// Supplies device identity signals on demand.
pub trait DeviceIdentityProvider: Send + Sync {
    /// Snapshot of the current device identity.
    fn identity(&self) -> DeviceIdentity;
}

/// Fixed device identity, set once by the host.
///
/// Suitable for hosts whose identity does not change at runtime, and as the
/// fallback when no provider is injected.
#[derive(Debug, Clone)]
pub struct StaticDeviceIdentity {
    identity: DeviceIdentity,
}

impl StaticDeviceIdentity {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self { identity }
    }
}

impl Default for StaticDeviceIdentity {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity {
                user_agent: concat!("wayplink-rust/", env!("CARGO_PKG_VERSION")).to_string(),
                screen_resolution: "0x0".to_string(),
                timezone: "UTC".to_string(),
                locale: "en-US".to_string(),
                device_model: "unknown".to_string(),
                os_version: std::env::consts::OS.to_string(),
                app_version: None,
            },
        }
    }
}

impl DeviceIdentityProvider for StaticDeviceIdentity {
    fn identity(&self) -> DeviceIdentity {
        self.identity.clone()
    }
}
