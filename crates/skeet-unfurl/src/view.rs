//! View models handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What kind of client the preview is being rendered for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Standard,
    /// Embeds with strict text limits (Discord video embeds)
    Compact,
    /// Clients that render instant-view pages (Telegram)
    Rich,
}

/// Flattened `app.bsky.actor.profile`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub did: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub disregard: bool,
    pub url: String,
}

/// Flattened `app.bsky.feed.post` with its quote and reply context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub uri: String,
    pub did: String,
    pub rkey: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub disregard: bool,
    /// Reply prefix, post text and quote block
    pub text: String,
    pub image_urls: Vec<String>,
    pub video: Option<VideoView>,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub extras: PostExtras,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoView {
    pub url: String,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Render-mode specific data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PostExtras {
    Standard,
    Compact,
    Rich(InstantView),
}

/// Instant-view page data for rich clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstantView {
    pub reply_count: u64,
    pub repost_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub following: Option<u64>,
    pub followers: Option<u64>,
    pub posts: Option<u64>,
    pub author_url: String,
    /// Non-empty lines of the post text
    pub paragraphs: Vec<String>,
}

impl InstantView {
    /// Reply, repost, like and quote counters as displayed
    pub fn counter_labels(&self) -> [String; 4] {
        [
            format!("💬 {}", self.reply_count),
            format!("🔁 {}", self.repost_count),
            format!("❤️ {}", self.like_count),
            format!("🔃 {}", self.quote_count),
        ]
    }
}
