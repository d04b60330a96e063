//! Attribution-link validation.

use url::Url;
use wayplink_types::WayplinkConfig;

/// Whether `uri` is a recognized attribution link for this app.
///
/// The host must be an exact member of the configured allowed-host set (no
/// subdomain wildcarding) and the path must contain at least one non-empty
/// segment. Unparseable URIs and URIs without a host fail closed.
pub(crate) fn is_recognized_link(config: &WayplinkConfig, uri: &str) -> bool {
    let Ok(parsed) = Url::parse(uri) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    if !config.allowed_hosts.contains(host) {
        return false;
    }
    parsed.path_segments().is_some_and(|mut segments| segments.any(|s| !s.is_empty()))
}
