//! Self-applied moderation labels

use crate::types::ProfileRecord;

/// Self-label asking clients not to show the account to logged-out viewers
pub const NO_UNAUTHENTICATED: &str = "!no-unauthenticated";

/// Whether viewers should be routed to the alternate viewer for this profile
pub fn is_disregarded(profile: &ProfileRecord) -> bool {
    profile
        .labels
        .as_ref()
        .is_some_and(|labels| labels.values.iter().any(|l| l.val == NO_UNAUTHENTICATED))
}
