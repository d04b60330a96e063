//! SDK entry point.

use std::sync::{Arc, PoisonError, RwLock};

use wayplink_types::{
    DeferredDeeplinkData, DynamicLink, DynamicLinkComponents, DynamicLinkShortenResponse,
    WayplinkConfig, WayplinkError,
};

use crate::config::ConfigCell;
use crate::deferred::DeferredDeeplinkCoordinator;
use crate::device::{DeviceIdentityProvider, StaticDeviceIdentity};
use crate::flag_store::{FileFlagStore, FlagStore, MemoryFlagStore};
use crate::transport::{HttpTransport, Transport};
use crate::validate;

/// Wayplink SDK handle.
///
/// One instance per app. All operations take `&self`; share via `Arc` when
/// calling from several tasks. Every operation other than
/// [`is_initialized`](Self::is_initialized) and
/// [`is_valid_link`](Self::is_valid_link) fails with `NotInitialized` until
/// [`initialize`](Self::initialize) has completed once.
pub struct Wayplink {
    config: ConfigCell,
    transport: RwLock<Option<Arc<dyn Transport>>>,
    custom_transport: Option<Arc<dyn Transport>>,
    deferred: DeferredDeeplinkCoordinator,
}

/// Collaborator injection for [`Wayplink`].
pub struct WayplinkBuilder {
    transport: Option<Arc<dyn Transport>>,
    flag_store: Option<Arc<dyn FlagStore>>,
    device: Option<Arc<dyn DeviceIdentityProvider>>,
}

impl WayplinkBuilder {
    /// Replace the default reqwest transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Replace the default file-backed flag store.
    pub fn flag_store(mut self, store: impl FlagStore + 'static) -> Self {
        self.flag_store = Some(Arc::new(store));
        self
    }

    /// Supply the host's device identity provider.
    pub fn device_identity(mut self, provider: impl DeviceIdentityProvider + 'static) -> Self {
        self.device = Some(Arc::new(provider));
        self
    }

    pub fn build(self) -> Wayplink {
        let flags = self.flag_store.unwrap_or_else(default_flag_store);
        let device = self
            .device
            .unwrap_or_else(|| Arc::new(StaticDeviceIdentity::default()) as Arc<dyn DeviceIdentityProvider>);
        Wayplink {
            config: ConfigCell::new(),
            transport: RwLock::new(None),
            custom_transport: self.transport,
            deferred: DeferredDeeplinkCoordinator::new(flags, device),
        }
    }
}

fn default_flag_store() -> Arc<dyn FlagStore> {
    match FileFlagStore::in_user_data_dir() {
        Some(store) => Arc::new(store),
        None => {
            tracing::warn!(
                "no user data directory available; first-launch state will not survive restarts"
            );
            Arc::new(MemoryFlagStore::new())
        },
    }
}

impl Wayplink {
    pub fn builder() -> WayplinkBuilder {
        WayplinkBuilder { transport: None, flag_store: None, device: None }
    }

    /// Initialize the SDK.
    ///
    /// Validates and normalizes the configuration and builds the HTTP
    /// transport with the configured TLS policy. Calling again silently
    /// overwrites the previous configuration; callers must not rely on
    /// immutability across re-initialization.
    pub fn initialize(&self, config: WayplinkConfig) -> Result<(), WayplinkError> {
        let config = config.validate()?;
        let transport = match &self.custom_transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(HttpTransport::new(&config)?) as Arc<dyn Transport>,
        };
        // Transport first: a visible config snapshot implies a usable transport.
        *self.transport.write().unwrap_or_else(PoisonError::into_inner) = Some(transport);
        tracing::info!(base_url = %config.base_url, "Wayplink SDK initialized");
        self.config.install(config);
        Ok(())
    }

    /// Whether `initialize` has completed. Side-effect-free.
    pub fn is_initialized(&self) -> bool {
        self.config.is_initialized()
    }

    /// Update the default project scope for link creation.
    pub fn set_project_id(&self, project_id: impl Into<String>) -> Result<(), WayplinkError> {
        let project_id = project_id.into();
        self.config.update(|c| c.project_id = Some(project_id))
    }

    /// Replace the allowed attribution-link host set.
    ///
    /// Concurrent readers keep their current snapshot; they never observe a
    /// partially-updated set.
    pub fn set_allowed_hosts<I, S>(&self, hosts: I) -> Result<(), WayplinkError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: std::collections::HashSet<String> = hosts.into_iter().map(Into::into).collect();
        self.config.update(|c| c.allowed_hosts = hosts)
    }

    /// Whether `uri` is a recognized attribution link for this app.
    ///
    /// Pure and synchronous; performs no network operation. Before
    /// `initialize` the allowed-host set is empty, so this returns `false`.
    pub fn is_valid_link(&self, uri: &str) -> bool {
        match self.config.try_snapshot() {
            Some(config) => validate::is_recognized_link(&config, uri),
            None => false,
        }
    }

    /// Exchange a short attribution link for its canonical target.
    pub async fn resolve(&self, uri: &str) -> Result<DynamicLink, WayplinkError> {
        let (config, transport) = self.session()?;
        if !validate::is_recognized_link(&config, uri) {
            return Err(WayplinkError::InvalidLink(format!(
                "not a recognized attribution link: {uri}"
            )));
        }
        let link = transport.exchange_short_link(&config, uri).await?;
        tracing::debug!(short = %uri, long = %link.long_link, "resolved dynamic link");
        Ok(link)
    }

    /// Create a short link from `components`.
    ///
    /// The effective project scope is the explicit `project_id` argument,
    /// else the configured default, else the call fails with
    /// `ProjectIdNotSet` before any network activity.
    pub async fn shorten(
        &self,
        components: &DynamicLinkComponents,
        project_id: Option<&str>,
    ) -> Result<DynamicLinkShortenResponse, WayplinkError> {
        let (config, transport) = self.session()?;
        let effective = project_id
            .or(config.project_id.as_deref())
            .ok_or(WayplinkError::ProjectIdNotSet)?;
        let response = transport.shorten_url(&config, effective, components).await?;
        tracing::debug!(project = %effective, short = %response.short_link, "created dynamic link");
        Ok(response)
    }

    /// Check for deferred attribution context captured before install.
    ///
    /// Runs the lookup at most once per install unless `force_check` is
    /// set; every launch after the first returns the sentinel without
    /// network activity. Never fails: errors (including calling before
    /// `initialize`) degrade to the sentinel and are logged.
    pub async fn check_deferred_deeplink(&self, force_check: bool) -> DeferredDeeplinkData {
        let Ok((config, transport)) = self.session() else {
            tracing::warn!("deferred deeplink check before initialize, returning no match");
            return DeferredDeeplinkData::not_found();
        };
        self.deferred.check(&config, transport.as_ref(), force_check).await
    }

    /// Confirm the install to the backend. Fire-and-forget: failures are
    /// logged, never surfaced.
    pub async fn confirm_install(&self) {
        let Ok((config, transport)) = self.session() else {
            tracing::warn!("install confirmation before initialize, skipping");
            return;
        };
        self.deferred.confirm_install(&config, transport.as_ref()).await;
    }

    /// Run the first-launch check on a background task.
    ///
    /// Intended to be called right after `initialize`; the task never
    /// blocks or fails application startup.
    pub fn spawn_startup_check(self: &Arc<Self>) {
        let sdk = Arc::clone(self);
        tokio::spawn(async move {
            let result = sdk.check_deferred_deeplink(false).await;
            if result.found {
                tracing::info!(deeplink_id = ?result.deeplink_id(), "deferred deeplink discovered at startup");
            }
        });
    }

    /// Force the first-launch gate back to unchecked. Test-only escape
    /// hatch.
    pub fn reset_deferred_deeplink_state(&self) {
        self.deferred.reset();
    }

    fn session(&self) -> Result<(Arc<WayplinkConfig>, Arc<dyn Transport>), WayplinkError> {
        let config = self.config.snapshot()?;
        let transport = self
            .transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(WayplinkError::NotInitialized)?;
        Ok((config, transport))
    }
}
