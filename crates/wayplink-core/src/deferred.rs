//! Deferred deeplink coordinator.
//!
//! Orchestrates the one-time-per-install sequence: check the backend for
//! pre-install attribution context, and on a match, confirm the install.
//! Discovery is best-effort: no failure in here ever reaches the caller.

use std::sync::Arc;

use tokio::sync::Mutex;
use wayplink_types::{DeferredDeeplinkData, WayplinkConfig};

use crate::device::DeviceIdentityProvider;
use crate::flag_store::FlagStore;
use crate::transport::{ConfirmInstallRequest, DeferredLookupRequest, Transport};

/// Flag key gating the deferred lookup to at most once per install.
pub(crate) const FIRST_LAUNCH_FLAG: &str = "deferred_deeplink_checked";

pub(crate) struct DeferredDeeplinkCoordinator {
    flags: Arc<dyn FlagStore>,
    device: Arc<dyn DeviceIdentityProvider>,
    // In-process exclusivity; the durable flag write is the authoritative
    // de-duplication across process restarts.
    check_lock: Mutex<()>,
}

impl DeferredDeeplinkCoordinator {
    pub(crate) fn new(flags: Arc<dyn FlagStore>, device: Arc<dyn DeviceIdentityProvider>) -> Self {
        Self { flags, device, check_lock: Mutex::new(()) }
    }

    /// Check for deferred attribution context.
    ///
    /// Steady state (flag set, `force_check` false) returns the sentinel
    /// without any network call. Otherwise the flag is written durably
    /// before the lookup starts: a failed lookup is never retried on a
    /// later launch unless forced.
    pub(crate) async fn check(
        &self,
        config: &WayplinkConfig,
        transport: &dyn Transport,
        force_check: bool,
    ) -> DeferredDeeplinkData {
        let _guard = self.check_lock.lock().await;

        if !force_check && self.flags.get(FIRST_LAUNCH_FLAG) {
            tracing::debug!("deferred deeplink already checked, skipping lookup");
            return DeferredDeeplinkData::not_found();
        }
        self.flags.set(FIRST_LAUNCH_FLAG, true);

        let request = DeferredLookupRequest::from_identity(&self.device.identity());
        match transport.get_deferred_deeplink(config, &request).await {
            Ok(response) => {
                let data = response.into_deeplink_data();
                if data.found {
                    tracing::info!(deeplink_id = ?data.deeplink_id(), "deferred deeplink found");
                    // Acknowledge the match in the same logical flow.
                    self.confirm_install(config, transport).await;
                }
                data
            },
            Err(error) => {
                tracing::warn!(%error, "deferred deeplink lookup failed");
                DeferredDeeplinkData::not_found()
            },
        }
    }

    /// Confirm the install to the backend. Fire-and-forget: failures are
    /// logged and swallowed.
    pub(crate) async fn confirm_install(&self, config: &WayplinkConfig, transport: &dyn Transport) {
        let request = ConfirmInstallRequest::from_identity(&self.device.identity());
        match transport.confirm_install(config, &request).await {
            Ok(()) => tracing::debug!("install confirmed"),
            Err(error) => tracing::warn!(%error, "install confirmation failed"),
        }
    }

    /// Force the first-launch gate back to unchecked. Test-only escape
    /// hatch; there is no transition back in normal operation.
    pub(crate) fn reset(&self) {
        self.flags.clear(FIRST_LAUNCH_FLAG);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use serde_json::json;
    use wayplink_types::{WayplinkConfig, WayplinkError};

    use super::*;
    use crate::device::StaticDeviceIdentity;
    use crate::flag_store::MemoryFlagStore;
    use crate::test_support::RecordingTransport;

    fn coordinator() -> (DeferredDeeplinkCoordinator, Arc<MemoryFlagStore>) {
        let flags = Arc::new(MemoryFlagStore::new());
        let coordinator = DeferredDeeplinkCoordinator::new(
            flags.clone(),
            Arc::new(StaticDeviceIdentity::default()),
        );
        (coordinator, flags)
    }

    fn config() -> WayplinkConfig {
        WayplinkConfig::new("https://api.wayp.link", "key")
    }

    #[tokio::test]
    async fn test_second_check_is_a_network_noop() {
        let (coordinator, flags) = coordinator();
        let transport = RecordingTransport::new();

        let first = coordinator.check(&config(), &transport, false).await;
        assert_eq!(first, DeferredDeeplinkData::not_found());
        assert!(flags.get(FIRST_LAUNCH_FLAG));
        assert_eq!(transport.lookup_calls.load(Ordering::SeqCst), 1);

        let second = coordinator.check(&config(), &transport, false).await;
        assert_eq!(second, DeferredDeeplinkData::not_found());
        assert_eq!(transport.lookup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_check_always_looks_up_and_keeps_flag() {
        let (coordinator, flags) = coordinator();
        let transport = RecordingTransport::new();

        coordinator.check(&config(), &transport, false).await;
        coordinator.check(&config(), &transport, true).await;
        assert_eq!(transport.lookup_calls.load(Ordering::SeqCst), 2);
        assert!(flags.get(FIRST_LAUNCH_FLAG), "force check must not reset the flag");
    }

    #[tokio::test]
    async fn test_lookup_failure_is_swallowed_and_flag_stays_set() {
        let (coordinator, flags) = coordinator();
        let transport = RecordingTransport::new();
        transport.fail_lookups_with(WayplinkError::Network("connection refused".into()));

        let result = coordinator.check(&config(), &transport, false).await;
        assert_eq!(result, DeferredDeeplinkData::not_found());
        assert!(flags.get(FIRST_LAUNCH_FLAG), "failed lookup is still an attempted check");
        assert_eq!(transport.confirm_calls.load(Ordering::SeqCst), 0);

        // Not retried on the next launch.
        coordinator.check(&config(), &transport, false).await;
        assert_eq!(transport.lookup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_found_match_triggers_confirm_install() {
        let (coordinator, _flags) = coordinator();
        let transport = RecordingTransport::new();
        transport.respond_lookups_with(json!({
            "found": true,
            "linkData": {"deeplink_id": "dl-1", "utm_source": "newsletter"}
        }));

        let result = coordinator.check(&config(), &transport, false).await;
        assert!(result.found);
        assert_eq!(result.deeplink_id(), Some("dl-1"));
        assert_eq!(transport.confirm_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_confirm_failure_does_not_mask_found_data() {
        let (coordinator, _flags) = coordinator();
        let transport = RecordingTransport::new();
        transport.respond_lookups_with(json!({
            "found": true,
            "linkData": {"deeplink_id": "dl-2"}
        }));
        transport.fail_confirms_with(WayplinkError::Remote {
            status: 500,
            message: "unavailable".into(),
        });

        let result = coordinator.check(&config(), &transport, false).await;
        assert!(result.found);
        assert_eq!(result.deeplink_id(), Some("dl-2"));
        assert_eq!(transport.confirm_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_reopens_the_gate() {
        let (coordinator, flags) = coordinator();
        let transport = RecordingTransport::new();

        coordinator.check(&config(), &transport, false).await;
        coordinator.reset();
        assert!(!flags.get(FIRST_LAUNCH_FLAG));

        coordinator.check(&config(), &transport, false).await;
        assert_eq!(transport.lookup_calls.load(Ordering::SeqCst), 2);
    }
}
