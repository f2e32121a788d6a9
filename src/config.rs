use std::env;

use crate::remote::RemoteOptions;

/// Deployment-wide tracking constants, read once at startup from the
/// environment. A missing, empty, or unparsable value disables the
/// corresponding global-tracking path; it is never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingConfig {
    /// Account id for global Google tracking.
    pub google_global_tracking_id: Option<String>,
    /// Namespace prefix for the global Google tracker calls.
    pub google_global_tracking_namespace: Option<String>,
    /// Site id for global Piwik tracking.
    pub piwik_global_tracking_id: Option<u32>,
    /// Cookie/link domain for global Piwik tracking, e.g. `*.example.edu`.
    pub piwik_global_tracking_domain: Option<String>,
    /// Piwik REST API host, without a protocol.
    pub piwik_global_tracking_rest_api: Option<String>,
    /// Seconds to wait for remote API requests.
    pub api_timeout_secs: u64,
    /// Disable TLS peer verification for the remote API.
    pub api_disable_tls_verification: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            google_global_tracking_id: None,
            google_global_tracking_namespace: None,
            piwik_global_tracking_id: None,
            piwik_global_tracking_domain: None,
            piwik_global_tracking_rest_api: None,
            api_timeout_secs: 30,
            api_disable_tls_verification: false,
        }
    }
}

impl TrackingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            google_global_tracking_id: env_string("TRACKLY_GOOGLE_GLOBAL_TRACKING_ID"),
            google_global_tracking_namespace: env_string("TRACKLY_GOOGLE_GLOBAL_TRACKING_NAMESPACE"),
            piwik_global_tracking_id: env_string("TRACKLY_PIWIK_GLOBAL_TRACKING_ID")
                .and_then(|v| v.parse().ok()),
            piwik_global_tracking_domain: env_string("TRACKLY_PIWIK_GLOBAL_TRACKING_DOMAIN"),
            piwik_global_tracking_rest_api: env_string("TRACKLY_PIWIK_GLOBAL_TRACKING_REST_API"),
            api_timeout_secs: env_string("TRACKLY_API_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.api_timeout_secs),
            api_disable_tls_verification: env_string("TRACKLY_API_DISABLE_TLS_VERIFICATION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.api_disable_tls_verification),
        }
    }

    /// Fetcher options for calls against the remote API. The user agent is
    /// taken from the environment when the host sets one.
    pub fn remote_options(&self) -> RemoteOptions {
        RemoteOptions {
            timeout_secs: self.api_timeout_secs,
            verify_tls: !self.api_disable_tls_verification,
            user_agent: env_string("TRACKLY_USER_AGENT"),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
