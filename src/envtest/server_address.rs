
use regex::{NoExpand, Regex};

/// Matches the API server address written by envtest, which is always a loopback address.
pub const LOOPBACK_SERVER_PATTERN: &str = r"server: https://(?:localhost|127\.0\.0\.1):\d+";

/// Points every loopback `server:` entry of the kubeconfig to `api_server_url`.
///
/// Addresses that are not loopback are kept as is, so kubeconfigs that already reference a
/// reachable address pass through unchanged.
pub fn rewrite_server_address(kubeconfig: &str, api_server_url: &str) -> Result<String, regex::Error> {
    let loopback_server = Regex::new(LOOPBACK_SERVER_PATTERN)?;
    let replacement = format!("server: {}", api_server_url);
    Ok(loopback_server
        .replace_all(kubeconfig, NoExpand(&replacement))
        .into_owned())
}
