//! Public Bluesky AppView lookups for instant-view counters

use std::fmt;
use std::sync::Arc;

use at_uri_parser::AtUri;
use atproto_identity::{Did, HttpClient, TransportError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_APPVIEW_URL: &str = "https://public.api.bsky.app";

#[derive(Debug)]
pub enum AppViewError {
    Transport(TransportError),
    Status(u16),
    Parse(String),
    /// The thread root was a not-found or blocked placeholder
    PostUnavailable,
}

impl fmt::Display for AppViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppViewError::Transport(err) => write!(f, "Transport error: {}", err),
            AppViewError::Status(status) => write!(f, "AppView returned status {}", status),
            AppViewError::Parse(msg) => write!(f, "Failed to parse AppView response: {}", msg),
            AppViewError::PostUnavailable => write!(f, "Post is not available on the AppView"),
        }
    }
}

impl std::error::Error for AppViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppViewError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Engagement counters of a post as seen by the AppView
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPost {
    #[serde(default)]
    pub author: ThreadAuthor,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadAuthor {
    pub avatar: Option<String>,
}

/// Follow graph counters of an actor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorCounts {
    pub followers_count: Option<u64>,
    pub follows_count: Option<u64>,
    pub posts_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PostThreadResponse {
    thread: ThreadNode,
}

#[derive(Debug, Deserialize)]
struct ThreadNode {
    post: Option<ThreadPost>,
}

/// Client for the unauthenticated Bluesky AppView
pub struct AppViewClient {
    http: Arc<dyn HttpClient>,
    service_url: String,
}

impl AppViewClient {
    pub fn new(http: Arc<dyn HttpClient>, service_url: &str) -> Self {
        Self {
            http,
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    /// Counters of the post at `uri`, without replies or parents beyond one
    pub async fn get_post_thread(&self, uri: &AtUri) -> Result<ThreadPost, AppViewError> {
        let url = format!(
            "{}/xrpc/app.bsky.feed.getPostThread?uri={uri}&depth=0&parentHeight=1",
            self.service_url
        );
        let response: PostThreadResponse = self.fetch(&url).await?;
        response.thread.post.ok_or(AppViewError::PostUnavailable)
    }

    pub async fn get_actor_counts(&self, did: &Did) -> Result<ActorCounts, AppViewError> {
        let url = format!(
            "{}/xrpc/app.bsky.actor.getProfile?actor={did}",
            self.service_url
        );
        self.fetch(&url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppViewError> {
        debug!(url, "Querying AppView");
        let response = self
            .http
            .get(url)
            .await
            .map_err(AppViewError::Transport)?;

        if !response.is_success() {
            return Err(AppViewError::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| AppViewError::Parse(e.to_string()))
    }
}
