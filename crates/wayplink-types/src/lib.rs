//! # Wayplink Types
//!
//! Core types, models, and error definitions for the Wayplink SDK.
//!
//! This crate provides the foundational type system for the Wayplink
//! workspace:
//!
//! - **`error`** - The SDK error taxonomy (`WayplinkError`)
//! - **`models`** - Domain models (config, links, deferred deeplinks, device identity)
//!
//! ## Architecture Role
//!
//! `wayplink-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!     wayplink-types (this crate)
//!            │
//!            ▼
//!      wayplink-core
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for wire bodies and IPC
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{Result, WayplinkError};

// Re-export core model types
pub use models::{
    DeferredDeeplinkData, DeferredLinkData, DeviceIdentity, DynamicLink, DynamicLinkComponents,
    DynamicLinkShortenResponse, WayplinkConfig,
};
