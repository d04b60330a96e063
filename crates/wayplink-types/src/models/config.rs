//! SDK configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::WayplinkError;

/// Full SDK configuration.
///
/// Constructed once per `initialize` call and held by the configuration gate
/// as an immutable snapshot. Post-init mutation (`project_id`,
/// `allowed_hosts`) is copy-on-write: the gate clones the snapshot, applies
/// the change, and swaps the whole object, so concurrent readers never see a
/// partially-updated host set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WayplinkConfig {
    /// Backend base URL, without trailing slash after normalization.
    pub base_url: String,
    /// API key sent with every backend request.
    pub api_key: String,
    /// Default project scope for link creation.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Hosts recognized as this app's attribution links.
    #[serde(default)]
    pub allowed_hosts: HashSet<String>,
    /// Development override: accept any TLS certificate.
    #[serde(default)]
    pub trust_all_certs: bool,
}

impl WayplinkConfig {
    /// Create a configuration with the required fields.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            project_id: None,
            allowed_hosts: HashSet::new(),
            trust_all_certs: false,
        }
    }

    /// Set the default project id used for link creation.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the allowed attribution-link hosts.
    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Enable the development trust-all-certificates override.
    pub fn with_trust_all_certs(mut self, trust_all_certs: bool) -> Self {
        self.trust_all_certs = trust_all_certs;
        self
    }

    /// Validate required fields and normalize the base URL.
    ///
    /// Fails with `InvalidConfiguration` when the base URL or API key is
    /// blank. Strips a trailing `/` so endpoint paths can be appended
    /// uniformly.
    pub fn validate(mut self) -> Result<Self, WayplinkError> {
        if self.base_url.trim().is_empty() {
            return Err(WayplinkError::InvalidConfiguration("base_url must not be blank".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(WayplinkError::InvalidConfiguration("api_key must not be blank".into()));
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        Ok(self)
    }
}
