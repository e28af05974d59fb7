//! Post card assembly
//!
//! The viewed post and its author's profile are the primary path: failures
//! there end the request. Quoted posts, reply parents and AppView counters
//! are secondary and always degrade to a placeholder or to less data.

use at_uri_parser::AtUri;
use atproto_identity::{Did, PdsIdentity};
use atproto_records::{blob_url, is_disregarded, ProfileRecord};
use tracing::{debug, warn};

use crate::error::{ResolutionError, Result};
use crate::text::{self, QuoteBlock, COMPACT_TEXT_LIMIT};
use crate::unfurler::Unfurler;
use crate::view::{InstantView, PostExtras, PostView, RenderMode, VideoView};

impl Unfurler {
    /// Resolve a post to its card, including quote and reply context
    pub async fn resolve_post(&self, actor: &str, rkey: &str, mode: RenderMode) -> Result<PostView> {
        let identity = self.identity.resolve_actor(actor).await?;
        let pds = identity.pds_endpoint.as_str();

        let (profile, post) = tokio::join!(
            self.records.get_profile(pds, &identity.did),
            self.records.get_post(pds, &identity.did, rkey),
        );

        let did = identity.did.to_string();
        let uri = AtUri::post(&did, rkey);
        let post = post?
            .value
            .ok_or_else(|| ResolutionError::RecordNotFound {
                uri: uri.to_string(),
            })?
            .normalize();
        let profile = profile?.value.unwrap_or_else(|| {
            debug!(did = %identity.did, "Author has no profile record");
            ProfileRecord::default()
        });

        let disregard = is_disregarded(&profile);

        let (quote, reply, instant_view) = tokio::join!(
            self.quote_block(post.quote_uri.as_deref()),
            self.reply_prefix(post.reply_parent_uri.as_deref()),
            async {
                match mode {
                    RenderMode::Rich => {
                        self.instant_view(&uri, &identity, &profile, &post.text, disregard)
                            .await
                    }
                    _ => None,
                }
            },
        );

        let image_urls = post
            .image_cids
            .iter()
            .map(|cid| blob_url(pds, &did, cid))
            .collect();
        let video = post.video.as_ref().map(|video| VideoView {
            url: blob_url(pds, &did, &video.cid),
            mime_type: video.mime_type.clone(),
            width: video.width,
            height: video.height,
        });

        let mut composed = text::compose(reply.as_deref(), &post.text, quote.as_deref());
        if mode == RenderMode::Compact && video.is_some() {
            composed = text::shorten(&composed, COMPACT_TEXT_LIMIT);
        }

        let extras = match (mode, instant_view) {
            (RenderMode::Rich, Some(view)) => PostExtras::Rich(view),
            (RenderMode::Compact, _) => PostExtras::Compact,
            _ => PostExtras::Standard,
        };

        debug!(uri = %uri, mode = ?mode, "Assembled post view");
        Ok(PostView {
            uri: uri.to_string(),
            url: self.config.post_url(&did, rkey, disregard),
            did,
            rkey: rkey.to_string(),
            handle: identity.handle.clone(),
            display_name: profile.display_name,
            disregard,
            text: composed,
            image_urls,
            video,
            created_at: post.created_at,
            extras,
        })
    }

    /// Rendered quote block for an embedded record, if it is a post
    async fn quote_block(&self, uri: Option<&str>) -> Option<String> {
        let quoted = embedded_post_uri(uri?, "quote")?;
        Some(self.resolve_quote(&quoted).await.render())
    }

    async fn resolve_quote(&self, quoted: &AtUri) -> QuoteBlock {
        let identity = match self.resolve_embedded_identity(&quoted.did).await {
            Some(identity) => identity,
            None => {
                return QuoteBlock::Deleted {
                    author: quoted.did.clone(),
                    handle: quoted.did.clone(),
                }
            }
        };
        let pds = identity.pds_endpoint.as_str();

        let (post, profile) = tokio::join!(
            self.records.get_post(pds, &identity.did, &quoted.rkey),
            self.records.get_profile(pds, &identity.did),
        );

        let display_name = match profile {
            Ok(record) => record.value.and_then(|p| p.display_name),
            Err(e) => {
                warn!(did = %identity.did, error = %e, "Failed to fetch quoted author profile");
                None
            }
        };
        let author = text::author_name(display_name.as_deref(), &identity.handle);
        let handle = identity.handle;

        match post {
            Ok(record) => match record.value {
                Some(post) => QuoteBlock::Quoted {
                    author,
                    handle,
                    text: post.text,
                },
                None => QuoteBlock::Deleted { author, handle },
            },
            Err(e) => {
                warn!(uri = %quoted, error = %e, "Failed to fetch quoted post");
                QuoteBlock::Deleted { author, handle }
            }
        }
    }

    /// "Reply to @handle: " for a reply, naming the parent's author
    async fn reply_prefix(&self, uri: Option<&str>) -> Option<String> {
        let parent = embedded_post_uri(uri?, "reply parent")?;
        let handle = match self.resolve_embedded_identity(&parent.did).await {
            Some(identity) => identity.handle,
            None => parent.did,
        };
        Some(text::reply_prefix(&handle))
    }

    /// Resolve a DID found inside a record, logging instead of failing
    async fn resolve_embedded_identity(&self, did: &str) -> Option<PdsIdentity> {
        let resolved = match Did::parse(did) {
            Ok(did) => self.identity.resolve_did(&did).await,
            Err(e) => Err(e),
        };
        match resolved {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(did, error = %e, "Failed to resolve embedded record author");
                None
            }
        }
    }

    async fn instant_view(
        &self,
        uri: &AtUri,
        identity: &PdsIdentity,
        profile: &ProfileRecord,
        post_text: &str,
        disregard: bool,
    ) -> Option<InstantView> {
        let (thread, counts) = tokio::join!(
            self.appview.get_post_thread(uri),
            self.appview.get_actor_counts(&identity.did),
        );

        let thread = match thread {
            Ok(thread) => thread,
            Err(e) => {
                warn!(uri = %uri, error = %e, "No AppView thread for instant view");
                return None;
            }
        };
        let counts = match counts {
            Ok(counts) => counts,
            Err(e) => {
                warn!(did = %identity.did, error = %e, "No AppView profile for instant view");
                return None;
            }
        };

        Some(InstantView {
            reply_count: thread.reply_count,
            repost_count: thread.repost_count,
            like_count: thread.like_count,
            quote_count: thread.quote_count,
            avatar: thread.author.avatar,
            bio: profile.description.clone(),
            following: counts.follows_count,
            followers: counts.followers_count,
            posts: counts.posts_count,
            author_url: self
                .config
                .profile_url(&identity.did.to_string(), disregard),
            paragraphs: paragraphs(post_text),
        })
    }
}

/// Parse a quote or reply reference, keeping it only if it names a post
fn embedded_post_uri(uri: &str, kind: &str) -> Option<AtUri> {
    let Some(parsed) = AtUri::parse(uri) else {
        warn!(uri, kind, "Malformed embedded record URI");
        return None;
    };
    if !parsed.is_post() {
        debug!(uri, kind, collection = %parsed.collection, "Embedded record is not a post");
        return None;
    }
    Some(parsed)
}

fn paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
