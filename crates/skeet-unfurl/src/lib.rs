//! Bluesky link-preview resolution
//!
//! Turns a handle or DID, and optionally a post record key, into a
//! flattened view model that a presentation layer can render as an
//! OpenGraph card. Identity resolution and record reads go straight to the
//! author's PDS; the AppView is only consulted for rich instant-view data.

mod appview;
mod config;
mod error;
mod post;
mod profile;
mod text;
mod unfurler;
mod view;

#[cfg(test)]
mod fixtures;

pub use appview::{AppViewClient, AppViewError, DEFAULT_APPVIEW_URL};
pub use config::UnfurlConfig;
pub use error::{ResolutionError, Result};
pub use text::{shorten, COMPACT_TEXT_LIMIT};
pub use unfurler::Unfurler;
pub use view::{InstantView, PostExtras, PostView, ProfileView, RenderMode, VideoView};
