//! Configuration gate.
//!
//! Holds the active [`WayplinkConfig`] as an `Arc` snapshot behind an
//! `RwLock`. Mutation is copy-on-write: clone the snapshot, apply the
//! change, swap the `Arc`. Readers hold their snapshot for the duration of
//! an operation and never observe a partially-updated host set.

use std::sync::{Arc, PoisonError, RwLock};

use wayplink_types::{WayplinkConfig, WayplinkError};

pub(crate) struct ConfigCell {
    inner: RwLock<Option<Arc<WayplinkConfig>>>,
}

impl ConfigCell {
    pub(crate) fn new() -> Self {
        Self { inner: RwLock::new(None) }
    }

    /// Install a validated configuration, silently overwriting any prior one.
    pub(crate) fn install(&self, config: WayplinkConfig) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(config));
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Current snapshot, or `None` before `initialize`.
    pub(crate) fn try_snapshot(&self) -> Option<Arc<WayplinkConfig>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Current snapshot; every gated operation starts here.
    pub(crate) fn snapshot(&self) -> Result<Arc<WayplinkConfig>, WayplinkError> {
        self.try_snapshot().ok_or(WayplinkError::NotInitialized)
    }

    /// Copy-on-write update of the active configuration.
    pub(crate) fn update<F>(&self, mutate: F) -> Result<(), WayplinkError>
    where
        F: FnOnce(&mut WayplinkConfig),
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let current = guard.as_ref().ok_or(WayplinkError::NotInitialized)?;
        let mut next = WayplinkConfig::clone(current);
        mutate(&mut next);
        *guard = Some(Arc::new(next));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WayplinkConfig {
        WayplinkConfig::new("https://api.wayp.link", "key")
    }

    #[test]
    fn test_empty_cell_is_uninitialized() {
        let cell = ConfigCell::new();
        assert!(!cell.is_initialized());
        assert_eq!(cell.snapshot().unwrap_err(), WayplinkError::NotInitialized);
    }

    #[test]
    fn test_update_before_install_fails() {
        let cell = ConfigCell::new();
        let err = cell.update(|c| c.project_id = Some("p".into())).unwrap_err();
        assert_eq!(err, WayplinkError::NotInitialized);
    }

    #[test]
    fn test_install_overwrites_silently() {
        let cell = ConfigCell::new();
        cell.install(config());
        cell.install(WayplinkConfig::new("https://other.wayp.link", "key2"));
        assert_eq!(cell.snapshot().unwrap().base_url, "https://other.wayp.link");
    }

    #[test]
    fn test_snapshot_is_stable_across_updates() {
        let cell = ConfigCell::new();
        cell.install(config().with_allowed_hosts(["a.wayp.link"]));
        let before = cell.snapshot().unwrap();

        cell.update(|c| {
            c.allowed_hosts = ["b.wayp.link".to_string()].into_iter().collect();
        })
        .unwrap();

        // Old snapshot still sees the old host set; new snapshot sees the new one.
        assert!(before.allowed_hosts.contains("a.wayp.link"));
        let after = cell.snapshot().unwrap();
        assert!(after.allowed_hosts.contains("b.wayp.link"));
        assert!(!after.allowed_hosts.contains("a.wayp.link"));
    }
}
