//! Deferred deeplink payload models.
//!
//! The backend returns attribution context as an opaque JSON object.
//! `DeferredLinkData` projects the well-known keys into typed optional
//! fields and retains everything else in an extension map, so unknown keys
//! from newer backends survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known keys projected out of the opaque link-data object.
const KNOWN_KEYS: &[&str] = &[
    "deeplink_id",
    "project_id",
    "original_url",
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "referer",
];

/// Result of a deferred-deeplink check.
///
/// `found == false` always implies `link_data == None`. Failures inside the
/// coordinator degrade to [`DeferredDeeplinkData::not_found`], never an
/// error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeferredDeeplinkData {
    /// Whether the backend matched pre-install attribution context.
    pub found: bool,
    /// The attribution payload when `found` is true.
    pub link_data: Option<DeferredLinkData>,
}

impl DeferredDeeplinkData {
    /// The sentinel "no attribution" result.
    pub fn not_found() -> Self {
        Self { found: false, link_data: None }
    }

    /// A successful match carrying the given payload.
    pub fn found(link_data: DeferredLinkData) -> Self {
        Self { found: true, link_data: Some(link_data) }
    }

    /// Accessor for `deeplink_id`; absent key yields `None`, never an error.
    pub fn deeplink_id(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.deeplink_id.as_deref())
    }

    /// Accessor for `project_id`.
    pub fn project_id(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.project_id.as_deref())
    }

    /// Accessor for `original_url`.
    pub fn original_url(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.original_url.as_deref())
    }

    /// Accessor for `utm_source`.
    pub fn utm_source(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.utm_source.as_deref())
    }

    /// Accessor for `utm_medium`.
    pub fn utm_medium(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.utm_medium.as_deref())
    }

    /// Accessor for `utm_campaign`.
    pub fn utm_campaign(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.utm_campaign.as_deref())
    }

    /// Accessor for `referer`.
    pub fn referer(&self) -> Option<&str> {
        self.link_data.as_ref().and_then(|d| d.referer.as_deref())
    }
}

/// Typed projection of the backend's attribution payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeferredLinkData {
    pub deeplink_id: Option<String>,
    pub project_id: Option<String>,
    pub original_url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub referer: Option<String>,
    /// Forward-compatible extension map: every key not projected above,
    /// plus known keys whose value was not a string.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl DeferredLinkData {
    /// Project a raw wire object into typed fields.
    ///
    /// A known key with a non-string value is left in `extra` and its typed
    /// field stays `None`; wrong-typed keys are "absent", never an error.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let get = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
        let mut data = Self {
            deeplink_id: get("deeplink_id"),
            project_id: get("project_id"),
            original_url: get("original_url"),
            utm_source: get("utm_source"),
            utm_medium: get("utm_medium"),
            utm_campaign: get("utm_campaign"),
            referer: get("referer"),
            extra: Map::new(),
        };
        data.extra = map
            .into_iter()
            .filter(|(key, value)| !KNOWN_KEYS.contains(&key.as_str()) || !value.is_string())
            .collect();
        data
    }
}
