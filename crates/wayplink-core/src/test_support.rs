//! Shared unit-test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use wayplink_types::{
    DynamicLink, DynamicLinkComponents, DynamicLinkShortenResponse, WayplinkConfig, WayplinkError,
};

use crate::transport::{
    ConfirmInstallRequest, DeferredLookupRequest, DeferredLookupResponse, Transport,
};

/// Transport double that counts calls and returns scripted responses.
pub(crate) struct RecordingTransport {
    pub exchange_calls: AtomicUsize,
    pub shorten_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
    pub confirm_calls: AtomicUsize,
    pub last_shorten_project: Mutex<Option<String>>,
    lookup_result: Mutex<Result<Value, WayplinkError>>,
    confirm_result: Mutex<Result<(), WayplinkError>>,
}

impl RecordingTransport {
    /// Double that succeeds everywhere and finds no deferred deeplink.
    pub(crate) fn new() -> Self {
        Self {
            exchange_calls: AtomicUsize::new(0),
            shorten_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            confirm_calls: AtomicUsize::new(0),
            last_shorten_project: Mutex::new(None),
            lookup_result: Mutex::new(Ok(serde_json::json!({"found": false}))),
            confirm_result: Mutex::new(Ok(())),
        }
    }

    /// Script the raw JSON body returned by the deferred lookup.
    pub(crate) fn respond_lookups_with(&self, body: Value) {
        *self.lookup_result.lock().unwrap_or_else(PoisonError::into_inner) = Ok(body);
    }

    pub(crate) fn fail_lookups_with(&self, error: WayplinkError) {
        *self.lookup_result.lock().unwrap_or_else(PoisonError::into_inner) = Err(error);
    }

    pub(crate) fn fail_confirms_with(&self, error: WayplinkError) {
        *self.confirm_result.lock().unwrap_or_else(PoisonError::into_inner) = Err(error);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn exchange_short_link(
        &self,
        _config: &WayplinkConfig,
        _uri: &str,
    ) -> Result<DynamicLink, WayplinkError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DynamicLink { long_link: "https://example.com/promo".to_string() })
    }

    async fn shorten_url(
        &self,
        _config: &WayplinkConfig,
        project_id: &str,
        components: &DynamicLinkComponents,
    ) -> Result<DynamicLinkShortenResponse, WayplinkError> {
        self.shorten_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_shorten_project.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(project_id.to_string());
        Ok(DynamicLinkShortenResponse {
            short_link: "https://acme.wayp.link/xYz1".to_string(),
            long_link: components.link.clone(),
            preview_link: None,
            warnings: Vec::new(),
        })
    }

    async fn get_deferred_deeplink(
        &self,
        _config: &WayplinkConfig,
        _request: &DeferredLookupRequest,
    ) -> Result<DeferredLookupResponse, WayplinkError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.lookup_result.lock().unwrap_or_else(PoisonError::into_inner).clone()?;
        serde_json::from_value(body)
            .map_err(|e| WayplinkError::Network(format!("scripted body invalid: {e}")))
    }

    async fn confirm_install(
        &self,
        _config: &WayplinkConfig,
        _request: &ConfirmInstallRequest,
    ) -> Result<(), WayplinkError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.confirm_result.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
