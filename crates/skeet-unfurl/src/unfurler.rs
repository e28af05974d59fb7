use std::sync::Arc;
use std::time::Duration;

use atproto_identity::{
    DnsTxtResolver, HickoryDnsTxtResolver, HttpClient, IdentityResolver, ReqwestHttpClient,
};
use atproto_records::RecordFetcher;

use crate::appview::AppViewClient;
use crate::config::UnfurlConfig;
use crate::error::Result;

/// Entry point for turning handles, DIDs and post keys into view models.
///
/// Holds no per-request state; one instance can serve concurrent requests.
pub struct Unfurler {
    pub(crate) identity: IdentityResolver,
    pub(crate) records: RecordFetcher,
    pub(crate) appview: AppViewClient,
    pub(crate) config: UnfurlConfig,
}

impl Unfurler {
    /// Create an unfurler using reqwest and the system DNS resolver
    pub fn new(config: UnfurlConfig) -> Result<Self> {
        let http = Arc::new(ReqwestHttpClient::with_options(
            &config.user_agent,
            Duration::from_secs(config.http_timeout_secs),
        ));
        let dns = Arc::new(HickoryDnsTxtResolver::from_system_conf()?);
        Ok(Self::with_transports(config, http, dns))
    }

    pub fn with_transports(
        config: UnfurlConfig,
        http: Arc<dyn HttpClient>,
        dns: Arc<dyn DnsTxtResolver>,
    ) -> Self {
        Self {
            identity: IdentityResolver::with_plc_directory(
                http.clone(),
                dns,
                &config.plc_directory_url,
            ),
            records: RecordFetcher::new(http.clone()),
            appview: AppViewClient::new(http, &config.appview_url),
            config,
        }
    }

    pub fn config(&self) -> &UnfurlConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atproto_identity::testing::{FakeDns, FakeHttp};

    #[test]
    fn test_config_is_exposed_unchanged() {
        let config = UnfurlConfig {
            appview_url: "https://appview.test".to_string(),
            ..UnfurlConfig::default()
        };
        let unfurler = Unfurler::with_transports(
            config.clone(),
            Arc::new(FakeHttp::new()),
            Arc::new(FakeDns::new()),
        );
        assert_eq!(unfurler.config(), &config);
    }
}
