//! Domain models for the Wayplink SDK.

mod config;
mod deeplink;
mod device;
mod link;

pub use config::WayplinkConfig;
pub use deeplink::{DeferredDeeplinkData, DeferredLinkData};
pub use device::DeviceIdentity;
pub use link::{DynamicLink, DynamicLinkComponents, DynamicLinkShortenResponse};
