//! Record retrieval from a PDS

use std::sync::Arc;

use at_uri_parser::{ACTOR_PROFILE, FEED_POST};
use atproto_identity::{Did, HttpClient};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{RecordError, Result};
use crate::types::{PostRecord, ProfileRecord, RecordResponse};

/// Reads records through `com.atproto.repo.getRecord`
pub struct RecordFetcher {
    http: Arc<dyn HttpClient>,
}

impl RecordFetcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch one record.
    ///
    /// The body is parsed whatever the status: a deleted record is an error
    /// response without `value`, reported as `value: None`.
    pub async fn get_record<T: DeserializeOwned>(
        &self,
        pds: &str,
        did: &Did,
        collection: &str,
        rkey: &str,
    ) -> Result<RecordResponse<T>> {
        let url = format!(
            "{pds}/xrpc/com.atproto.repo.getRecord?repo={did}&collection={collection}&rkey={rkey}"
        );
        debug!(url = %url, "Fetching record");

        let response = self.http.get(&url).await?;
        let record: RecordResponse<T> = serde_json::from_str(&response.body).map_err(|e| {
            RecordError::Malformed(format!(
                "getRecord for {did}/{collection}/{rkey} returned status {}: {e}",
                response.status
            ))
        })?;

        if record.value.is_none() {
            debug!(
                did = %did,
                collection,
                rkey,
                error = record.error.as_deref().unwrap_or("none"),
                "Record does not exist"
            );
        }

        Ok(record)
    }

    pub async fn get_profile(&self, pds: &str, did: &Did) -> Result<RecordResponse<ProfileRecord>> {
        self.get_record(pds, did, ACTOR_PROFILE, "self").await
    }

    pub async fn get_post(
        &self,
        pds: &str,
        did: &Did,
        rkey: &str,
    ) -> Result<RecordResponse<PostRecord>> {
        self.get_record(pds, did, FEED_POST, rkey).await
    }
}
