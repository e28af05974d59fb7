//! Record shapes read from `com.atproto.repo.getRecord`
//!
//! Only the fields needed for link previews are modelled. Everything is
//! optional so that a record missing a field parses to `None` instead of
//! failing.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of a getRecord response.
///
/// A deleted record comes back as an error body (`{"error": "RecordNotFound"}`)
/// which parses to `value: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordResponse<T> {
    pub uri: Option<String>,
    pub cid: Option<String>,
    pub value: Option<T>,
    pub error: Option<String>,
}

/// Reference to a blob, in either the current or the legacy encoding
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobRef {
    #[serde(rename = "ref")]
    pub link: Option<CidLink>,
    /// Legacy blobs carry the CID directly
    pub cid: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CidLink {
    #[serde(rename = "$link")]
    pub link: String,
}

impl BlobRef {
    pub fn cid(&self) -> Option<&str> {
        self.link
            .as_ref()
            .map(|l| l.link.as_str())
            .or(self.cid.as_deref())
    }
}

/// `app.bsky.actor.profile`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<BlobRef>,
    pub labels: Option<SelfLabels>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelfLabels {
    #[serde(default)]
    pub values: Vec<SelfLabel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelfLabel {
    pub val: String,
}

/// `app.bsky.feed.post`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    pub created_at: Option<String>,
    pub embed: Option<Embed>,
    pub reply: Option<ReplyRef>,
}

/// Union of the embed variants we read.
///
/// `app.bsky.embed.recordWithMedia` nests its media under `media`, which has
/// the same shape as a top-level images or video embed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embed {
    pub images: Option<Vec<ImageEmbed>>,
    pub video: Option<BlobRef>,
    pub aspect_ratio: Option<AspectRatio>,
    pub record: Option<EmbedRecord>,
    pub media: Option<Box<Embed>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageEmbed {
    pub image: Option<BlobRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

/// `embed.record` is a strong ref for plain quotes and wraps one for
/// record-with-media quotes.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedRecord {
    pub uri: Option<String>,
    pub record: Option<StrongRef>,
}

/// A `com.atproto.repo.strongRef`; only the URI is needed
#[derive(Debug, Clone, Deserialize)]
pub struct StrongRef {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRef {
    pub parent: Option<StrongRef>,
}

/// Video attached to a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub cid: String,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A post with its embed locations collapsed into one shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPost {
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Direct images first, then record-with-media images
    pub image_cids: Vec<String>,
    pub video: Option<VideoRef>,
    pub quote_uri: Option<String>,
    pub reply_parent_uri: Option<String>,
}

impl Embed {
    fn image_cids(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .flatten()
            .filter_map(|img| img.image.as_ref()?.cid())
    }

    fn video_ref(&self) -> Option<VideoRef> {
        let blob = self.video.as_ref()?;
        Some(VideoRef {
            cid: blob.cid()?.to_string(),
            mime_type: blob.mime_type.clone(),
            width: self.aspect_ratio.map(|ar| ar.width),
            height: self.aspect_ratio.map(|ar| ar.height),
        })
    }

    fn quote_uri(&self) -> Option<&str> {
        let record = self.record.as_ref()?;
        record
            .uri
            .as_deref()
            .or_else(|| record.record.as_ref().map(|r| r.uri.as_str()))
    }
}

impl PostRecord {
    pub fn normalize(self) -> NormalizedPost {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        let reply_parent_uri = self.reply.and_then(|r| r.parent).map(|p| p.uri);

        let Some(embed) = self.embed else {
            return NormalizedPost {
                text: self.text,
                created_at,
                reply_parent_uri,
                ..Default::default()
            };
        };

        let media = embed.media.as_deref();
        let image_cids = embed
            .image_cids()
            .chain(media.into_iter().flat_map(Embed::image_cids))
            .map(str::to_string)
            .collect();
        let video = embed
            .video_ref()
            .or_else(|| media.and_then(Embed::video_ref));
        let quote_uri = embed.quote_uri().map(str::to_string);

        NormalizedPost {
            text: self.text,
            created_at,
            image_cids,
            video,
            quote_uri,
            reply_parent_uri,
        }
    }
}
