//! AT Protocol Record Access
//!
//! Fetches `app.bsky.actor.profile` and `app.bsky.feed.post` records from a
//! PDS, parses them into typed shapes and builds blob URLs for their media.

pub mod blob;
pub mod error;
pub mod fetcher;
pub mod labels;
pub mod types;

pub use blob::blob_url;
pub use error::{RecordError, Result};
pub use fetcher::RecordFetcher;
pub use labels::is_disregarded;
pub use types::{
    BlobRef, NormalizedPost, PostRecord, ProfileRecord, RecordResponse, VideoRef,
};
