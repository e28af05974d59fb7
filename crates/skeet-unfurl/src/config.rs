use std::env;

use atproto_identity::{BROWSER_USER_AGENT, DEFAULT_PLC_DIRECTORY};

use crate::appview::DEFAULT_APPVIEW_URL;

pub const DEFAULT_CANONICAL_PROFILE_URL: &str = "https://bsky.app/profile/";
pub const DEFAULT_ALTERNATE_PROFILE_URL: &str = "https://skychat.social/#profile/";
pub const DEFAULT_ALTERNATE_THREAD_URL: &str = "https://skychat.social/#thread/";

/// Upstream endpoints and public viewer URLs used while unfurling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfurlConfig {
    pub plc_directory_url: String,
    pub appview_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    /// Prefix for profile links; the DID is appended
    pub canonical_profile_url: String,
    /// Profile prefix used for accounts hidden from logged-out viewers
    pub alternate_profile_url: String,
    /// Thread prefix used for accounts hidden from logged-out viewers
    pub alternate_thread_url: String,
}

impl Default for UnfurlConfig {
    fn default() -> Self {
        Self {
            plc_directory_url: DEFAULT_PLC_DIRECTORY.to_string(),
            appview_url: DEFAULT_APPVIEW_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            http_timeout_secs: 30,
            canonical_profile_url: DEFAULT_CANONICAL_PROFILE_URL.to_string(),
            alternate_profile_url: DEFAULT_ALTERNATE_PROFILE_URL.to_string(),
            alternate_thread_url: DEFAULT_ALTERNATE_THREAD_URL.to_string(),
        }
    }
}

impl UnfurlConfig {
    /// Parse configuration from environment variables, defaulting each one
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.http_timeout_secs);

        Self {
            plc_directory_url: env::var("PLC_DIRECTORY_URL")
                .unwrap_or(defaults.plc_directory_url),
            appview_url: env::var("APPVIEW_URL").unwrap_or(defaults.appview_url),
            user_agent: env::var("USER_AGENT").unwrap_or(defaults.user_agent),
            http_timeout_secs,
            canonical_profile_url: env::var("CANONICAL_PROFILE_URL")
                .unwrap_or(defaults.canonical_profile_url),
            alternate_profile_url: env::var("ALTERNATE_PROFILE_URL")
                .unwrap_or(defaults.alternate_profile_url),
            alternate_thread_url: env::var("ALTERNATE_THREAD_URL")
                .unwrap_or(defaults.alternate_thread_url),
        }
    }

    /// Public link to a profile
    pub fn profile_url(&self, did: &str, disregard: bool) -> String {
        if disregard {
            format!("{}{did}", self.alternate_profile_url)
        } else {
            format!("{}{did}", self.canonical_profile_url)
        }
    }

    /// Public link to a post
    pub fn post_url(&self, did: &str, rkey: &str, disregard: bool) -> String {
        if disregard {
            format!("{}{did}/{rkey}", self.alternate_thread_url)
        } else {
            format!("{}/post/{rkey}", self.profile_url(did, false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UnfurlConfig::default();
        assert_eq!(config.plc_directory_url, "https://plc.directory");
        assert_eq!(config.appview_url, "https://public.api.bsky.app");
        assert_eq!(config.http_timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_profile_urls() {
        let config = UnfurlConfig::default();
        assert_eq!(
            config.profile_url("did:plc:123", false),
            "https://bsky.app/profile/did:plc:123"
        );
        assert_eq!(
            config.profile_url("did:plc:123", true),
            "https://skychat.social/#profile/did:plc:123"
        );
    }

    #[test]
    fn test_post_urls() {
        let config = UnfurlConfig::default();
        assert_eq!(
            config.post_url("did:plc:123", "3kabc", false),
            "https://bsky.app/profile/did:plc:123/post/3kabc"
        );
        assert_eq!(
            config.post_url("did:plc:123", "3kabc", true),
            "https://skychat.social/#thread/did:plc:123/3kabc"
        );
    }
}
