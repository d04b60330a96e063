//! # Wayplink Core
//!
//! Client SDK for the Wayplink attribution-link backend: resolves short
//! attribution links to their canonical targets, creates new short links
//! scoped to a project, and discovers deferred attribution context on first
//! launch (confirming the install back to the backend).
//!
//! The SDK is an explicit instance, not process-global state:
//!
//! ```no_run
//! use wayplink_core::{Wayplink, WayplinkConfig};
//!
//! # async fn run() -> Result<(), wayplink_core::WayplinkError> {
//! let sdk = Wayplink::builder().build();
//! sdk.initialize(
//!     WayplinkConfig::new("https://api.wayp.link", "wl-secret")
//!         .with_project_id("proj-1")
//!         .with_allowed_hosts(["acme.wayp.link"]),
//! )?;
//!
//! let link = sdk.resolve("https://acme.wayp.link/xYz1").await?;
//! println!("resolved to {}", link.long_link);
//! # Ok(())
//! # }
//! ```
//!
//! Collaborators (HTTP transport, flag store, device identity) are injected
//! through [`Wayplink::builder`]; defaults cover the common host setup.

mod client;
mod config;
mod deferred;
pub mod device;
pub mod flag_store;
pub mod transport;
mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{Wayplink, WayplinkBuilder};
pub use device::{DeviceIdentityProvider, StaticDeviceIdentity};
pub use flag_store::{FileFlagStore, FlagStore, MemoryFlagStore};
pub use transport::{HttpTransport, Transport};

// Re-export the model types SDK callers interact with.
pub use wayplink_types::{
    DeferredDeeplinkData, DeferredLinkData, DeviceIdentity, DynamicLink, DynamicLinkComponents,
    DynamicLinkShortenResponse, WayplinkConfig, WayplinkError,
};
