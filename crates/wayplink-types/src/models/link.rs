//! Dynamic link models: resolve output, shorten input and output.

use serde::{Deserialize, Serialize};

/// Resolved canonical target of a short attribution link.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DynamicLink {
    /// The canonical long-form target URL.
    pub long_link: String,
}

/// Caller-supplied description of a link to be shortened.
///
/// Serialized as the create-link request body; absent UTM fields are
/// skipped on the wire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DynamicLinkComponents {
    /// Target URL the short link should resolve to.
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
}

impl DynamicLinkComponents {
    /// Components with the target URL and no metadata.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            utm_term: None,
            utm_content: None,
        }
    }

    pub fn with_utm_source(mut self, value: impl Into<String>) -> Self {
        self.utm_source = Some(value.into());
        self
    }

    pub fn with_utm_medium(mut self, value: impl Into<String>) -> Self {
        self.utm_medium = Some(value.into());
        self
    }

    pub fn with_utm_campaign(mut self, value: impl Into<String>) -> Self {
        self.utm_campaign = Some(value.into());
        self
    }

    pub fn with_utm_term(mut self, value: impl Into<String>) -> Self {
        self.utm_term = Some(value.into());
        self
    }

    pub fn with_utm_content(mut self, value: impl Into<String>) -> Self {
        self.utm_content = Some(value.into());
        self
    }
}

/// Backend result of a shorten call.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DynamicLinkShortenResponse {
    /// The newly created short link.
    pub short_link: String,
    /// The long-form target the short link resolves to.
    pub long_link: String,
    /// Optional preview page URL.
    #[serde(default)]
    pub preview_link: Option<String>,
    /// Non-fatal notes from the backend (e.g. ignored fields).
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_skip_absent_fields() {
        let components = DynamicLinkComponents::new("https://example.com/promo")
            .with_utm_source("newsletter")
            .with_utm_campaign("spring");
        let json = serde_json::to_value(&components).unwrap();
        assert_eq!(json["link"], "https://example.com/promo");
        assert_eq!(json["utmSource"], "newsletter");
        assert_eq!(json["utmCampaign"], "spring");
        assert!(json.get("utmMedium").is_none());
        assert!(json.get("utmTerm").is_none());
    }

    #[test]
    fn test_shorten_response_defaults() {
        let json = r#"{"shortLink": "https://acme.wayp.link/xYz1", "longLink": "https://example.com/promo"}"#;
        let resp: DynamicLinkShortenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.short_link, "https://acme.wayp.link/xYz1");
        assert!(resp.preview_link.is_none());
        assert!(resp.warnings.is_empty());
    }
}
