//! Parser for AT Protocol URIs
//!
//! Splits `at://<did>/<collection>/<rkey>` into its parts. Quote embeds and
//! reply references point at other records this way.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// NSID of the Bluesky post collection
pub const FEED_POST: &str = "app.bsky.feed.post";

/// NSID of the Bluesky profile collection
pub const ACTOR_PROFILE: &str = "app.bsky.actor.profile";

/// Parsed components of an AT Protocol URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtUri {
    pub did: String,
    pub collection: String,
    pub rkey: String,
}

static AT_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^at://([^/]+)/([^/]+)/([^/]+)$").unwrap());

impl AtUri {
    /// Parse an AT Protocol URI like "at://did:plc:xxx/app.bsky.feed.post/rkey"
    pub fn parse(uri: &str) -> Option<Self> {
        let caps = AT_URI_RE.captures(uri)?;
        Some(Self {
            did: caps[1].to_string(),
            collection: caps[2].to_string(),
            rkey: caps[3].to_string(),
        })
    }

    /// Parse a URI that must reference a feed post.
    ///
    /// Returns `None` for malformed URIs and for records in any other
    /// collection (feed generators, lists, starter packs...).
    pub fn parse_post(uri: &str) -> Option<Self> {
        Self::parse(uri).filter(Self::is_post)
    }

    pub fn is_post(&self) -> bool {
        self.collection == FEED_POST
    }

    /// Build the URI of a post record
    pub fn post(did: &str, rkey: &str) -> Self {
        Self {
            did: did.to_string(),
            collection: FEED_POST.to_string(),
            rkey: rkey.to_string(),
        }
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{}/{}", self.did, self.collection, self.rkey)
    }
}
