//! Default reqwest-backed transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use wayplink_types::{
    DynamicLink, DynamicLinkComponents, DynamicLinkShortenResponse, WayplinkConfig, WayplinkError,
};

use super::wire::{
    ConfirmInstallRequest, DeferredLookupRequest, DeferredLookupResponse, ExchangeRequest,
};
use super::{Transport, API_KEY_HEADER, SCHEMA_VERSION, SCHEMA_VERSION_HEADER};

/// HTTP transport over reqwest.
///
/// TLS trust policy is applied at build time; rebuild (re-`initialize`) to
/// change it. No timeout beyond reqwest defaults and no retries; both
/// belong to the host if it wants them, via a custom [`Transport`].
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &WayplinkConfig) -> Result<Self, WayplinkError> {
        let mut builder = Client::builder().tcp_nodelay(true);
        if config.trust_all_certs {
            tracing::warn!("TLS certificate verification disabled (trust_all_certs)");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(|e| WayplinkError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        config: &WayplinkConfig,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, WayplinkError> {
        let resp = self
            .client
            .post(format!("{}{}", config.base_url, path))
            .header(API_KEY_HEADER, &config.api_key)
            .header(SCHEMA_VERSION_HEADER, SCHEMA_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| WayplinkError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &body));
        }
        Ok(resp)
    }
}

/// Map a non-2xx response to the error taxonomy.
///
/// A structured backend error passes through verbatim; anything the backend
/// did not classify falls back to `InvalidLink`.
fn classify_error(status: u16, body: &str) -> WayplinkError {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .or_else(|| value.get("message").and_then(Value::as_str));
        if let Some(message) = message {
            return WayplinkError::Remote { status, message: message.to_string() };
        }
    }
    WayplinkError::InvalidLink(format!("backend rejected request with status {status}"))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange_short_link(
        &self,
        config: &WayplinkConfig,
        uri: &str,
    ) -> Result<DynamicLink, WayplinkError> {
        let resp =
            self.post_json(config, "/api/v1/links/resolve", &ExchangeRequest { url: uri }).await?;
        resp.json()
            .await
            .map_err(|e| WayplinkError::Network(format!("invalid resolve response: {e}")))
    }

    async fn shorten_url(
        &self,
        config: &WayplinkConfig,
        project_id: &str,
        components: &DynamicLinkComponents,
    ) -> Result<DynamicLinkShortenResponse, WayplinkError> {
        let path = format!("/api/v1/projects/{project_id}/links");
        let resp = self.post_json(config, &path, components).await?;
        resp.json()
            .await
            .map_err(|e| WayplinkError::Network(format!("invalid shorten response: {e}")))
    }

    async fn get_deferred_deeplink(
        &self,
        config: &WayplinkConfig,
        request: &DeferredLookupRequest,
    ) -> Result<DeferredLookupResponse, WayplinkError> {
        let resp = self.post_json(config, "/api/v1/deferred-deeplink", request).await?;
        resp.json()
            .await
            .map_err(|e| WayplinkError::Network(format!("invalid deferred-deeplink response: {e}")))
    }

    async fn confirm_install(
        &self,
        config: &WayplinkConfig,
        request: &ConfirmInstallRequest,
    ) -> Result<(), WayplinkError> {
        // Response body is ignored beyond success/failure.
        let _resp = self.post_json(config, "/api/v1/installs", request).await?;
        Ok(())
    }
}
