//! Fake network for unfurler tests

use std::sync::Arc;

use atproto_identity::testing::{did_document, FakeDns, FakeHttp};
use serde_json::{json, Value};

use crate::config::UnfurlConfig;
use crate::unfurler::Unfurler;

pub(crate) struct Fixture {
    pub(crate) http: Arc<FakeHttp>,
    pub(crate) dns: Arc<FakeDns>,
    pub(crate) unfurler: Unfurler,
}

pub(crate) fn record_url(pds: &str, did: &str, collection: &str, rkey: &str) -> String {
    format!("{pds}/xrpc/com.atproto.repo.getRecord?repo={did}&collection={collection}&rkey={rkey}")
}

pub(crate) fn blob(cid: &str, mime_type: &str) -> Value {
    json!({ "$type": "blob", "ref": { "$link": cid }, "mimeType": mime_type, "size": 1024 })
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        let unfurler =
            Unfurler::with_transports(UnfurlConfig::default(), http.clone(), dns.clone());
        Self { http, dns, unfurler }
    }

    /// Register a did:plc actor reachable by handle through DNS
    pub(crate) fn actor(&self, handle: &str, did: &str, pds: &str) {
        let txt = format!("did={did}");
        self.dns.answer(&format!("_atproto.{handle}"), &[txt.as_str()]);
        self.http.respond(
            &format!("https://plc.directory/{did}"),
            200,
            did_document(did, handle, pds),
        );
    }

    pub(crate) fn profile(&self, pds: &str, did: &str, value: Value) {
        self.http.respond(
            &record_url(pds, did, "app.bsky.actor.profile", "self"),
            200,
            json!({
                "uri": format!("at://{did}/app.bsky.actor.profile/self"),
                "cid": "bafyprofile",
                "value": value,
            })
            .to_string(),
        );
    }

    pub(crate) fn post(&self, pds: &str, did: &str, rkey: &str, value: Value) {
        self.http.respond(
            &record_url(pds, did, "app.bsky.feed.post", rkey),
            200,
            json!({
                "uri": format!("at://{did}/app.bsky.feed.post/{rkey}"),
                "cid": "bafypost",
                "value": value,
            })
            .to_string(),
        );
    }

    pub(crate) fn missing_record(&self, pds: &str, did: &str, collection: &str, rkey: &str) {
        self.http.respond(
            &record_url(pds, did, collection, rkey),
            400,
            json!({
                "error": "RecordNotFound",
                "message": format!("Could not locate record: at://{did}/{collection}/{rkey}"),
            })
            .to_string(),
        );
    }
}
