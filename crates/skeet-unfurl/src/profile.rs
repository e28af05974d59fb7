//! Profile card assembly

use at_uri_parser::ACTOR_PROFILE;
use atproto_identity::PdsIdentity;
use atproto_records::{blob_url, is_disregarded, ProfileRecord};
use tracing::debug;

use crate::config::UnfurlConfig;
use crate::error::{ResolutionError, Result};
use crate::unfurler::Unfurler;
use crate::view::ProfileView;

impl Unfurler {
    /// Resolve a handle or DID to its profile card
    pub async fn resolve_profile(&self, actor: &str) -> Result<ProfileView> {
        let identity = self.identity.resolve_actor(actor).await?;
        let record = self
            .records
            .get_profile(&identity.pds_endpoint, &identity.did)
            .await?;

        let profile = record.value.ok_or_else(|| ResolutionError::RecordNotFound {
            uri: format!("at://{}/{ACTOR_PROFILE}/self", identity.did),
        })?;

        debug!(did = %identity.did, handle = %identity.handle, "Assembled profile view");
        Ok(assemble_profile(&identity, &profile, &self.config))
    }
}

pub(crate) fn assemble_profile(
    identity: &PdsIdentity,
    profile: &ProfileRecord,
    config: &UnfurlConfig,
) -> ProfileView {
    let did = identity.did.to_string();
    let avatar_url = profile
        .avatar
        .as_ref()
        .and_then(|avatar| avatar.cid())
        .map(|cid| blob_url(&identity.pds_endpoint, &did, cid));
    let disregard = is_disregarded(profile);

    ProfileView {
        url: config.profile_url(&did, disregard),
        did,
        handle: identity.handle.clone(),
        display_name: profile.display_name.clone(),
        description: profile.description.clone(),
        avatar_url,
        disregard,
    }
}
