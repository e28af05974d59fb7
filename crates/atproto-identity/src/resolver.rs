use std::sync::Arc;

use tracing::{debug, warn};

use crate::did::Did;
use crate::error::{IdentityError, Result};
use crate::transport::{DnsTxtResolver, HttpClient};
use crate::types::{DidDocument, PdsIdentity};

pub const DEFAULT_PLC_DIRECTORY: &str = "https://plc.directory";

/// Resolves AT Protocol identities (handles → DIDs → PDS endpoints)
pub struct IdentityResolver {
    http: Arc<dyn HttpClient>,
    dns: Arc<dyn DnsTxtResolver>,
    plc_directory_url: String,
}

impl IdentityResolver {
    /// Create a resolver using the public PLC directory
    pub fn new(http: Arc<dyn HttpClient>, dns: Arc<dyn DnsTxtResolver>) -> Self {
        Self::with_plc_directory(http, dns, DEFAULT_PLC_DIRECTORY)
    }

    /// Create a resolver using a custom PLC directory
    pub fn with_plc_directory(
        http: Arc<dyn HttpClient>,
        dns: Arc<dyn DnsTxtResolver>,
        plc_directory_url: &str,
    ) -> Self {
        Self {
            http,
            dns,
            plc_directory_url: plc_directory_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a handle to a DID.
    ///
    /// Tries the `_atproto.<handle>` TXT record first and falls back to
    /// `https://<handle>/.well-known/atproto-did` only when DNS has no answer.
    pub async fn resolve_handle(&self, handle: &str) -> Result<Did> {
        let name = format!("_atproto.{handle}");

        match self.dns.txt_records(&name).await {
            Ok(records) => {
                if let Some(record) = records.first() {
                    let did = record
                        .strip_prefix("did=")
                        .filter(|did| did.starts_with("did:"))
                        .ok_or_else(|| {
                            IdentityError::Malformed(format!(
                                "TXT record at {name} is not a did= entry: {record}"
                            ))
                        })?;
                    debug!(handle, did, "Resolved handle via DNS");
                    return Did::parse(did);
                }
                debug!(handle, "No DNS answer, trying well-known endpoint");
            }
            Err(e) => {
                debug!(handle, error = %e, "DNS lookup failed, trying well-known endpoint");
            }
        }

        let url = format!("https://{handle}/.well-known/atproto-did");
        let response = self.http.get(&url).await.map_err(|e| {
            warn!(handle, error = %e, "Well-known handle lookup failed");
            IdentityError::HandleUnresolvable(handle.to_string())
        })?;

        if !response.is_success() {
            warn!(handle, status = response.status, "Well-known handle lookup rejected");
            return Err(IdentityError::HandleUnresolvable(handle.to_string()));
        }

        if !response.body.starts_with("did:") {
            return Err(IdentityError::Malformed(format!(
                "{url} did not return a DID"
            )));
        }

        debug!(handle, did = %response.body, "Resolved handle via well-known endpoint");
        Did::parse(&response.body)
    }

    /// Resolve a DID to its PDS endpoint and canonical handle
    pub async fn resolve_did(&self, did: &Did) -> Result<PdsIdentity> {
        let url = self.did_document_url(did);
        debug!(did = %did, url = %url, "Fetching DID document");

        let response = self.http.get(&url).await?;
        if !response.is_success() {
            return Err(IdentityError::invalid_did(
                did,
                format!("DID document request returned status {}", response.status),
            ));
        }

        let doc: DidDocument = serde_json::from_str(&response.body).map_err(|e| {
            IdentityError::Malformed(format!("DID document for {did} is not valid JSON: {e}"))
        })?;

        let handle = doc
            .handle()
            .ok_or_else(|| IdentityError::invalid_did(did, "no at:// alias in DID document"))?;
        let pds_endpoint = doc
            .pds_endpoint()
            .ok_or_else(|| IdentityError::invalid_did(did, "no PDS service in DID document"))?;

        debug!(did = %did, handle, pds = pds_endpoint, "Resolved DID document");
        Ok(PdsIdentity {
            did: did.clone(),
            handle: handle.to_string(),
            pds_endpoint: pds_endpoint.to_string(),
        })
    }

    /// Resolve either a DID or a handle all the way to its PDS
    pub async fn resolve_actor(&self, actor: &str) -> Result<PdsIdentity> {
        let did = if actor.starts_with("did:") {
            Did::parse(actor)?
        } else {
            self.resolve_handle(actor).await?
        };
        self.resolve_did(&did).await
    }

    fn did_document_url(&self, did: &Did) -> String {
        match did {
            Did::Plc(_) => format!("{}/{did}", self.plc_directory_url),
            Did::Web(_) => {
                let domain = did.web_domain().unwrap_or_default();
                format!("https://{domain}/.well-known/did.json")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{did_document, FakeDns, FakeHttp};

    fn resolver(http: &Arc<FakeHttp>, dns: &Arc<FakeDns>) -> IdentityResolver {
        IdentityResolver::new(http.clone(), dns.clone())
    }

    #[tokio::test]
    async fn test_resolve_handle_via_dns_skips_http() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        dns.answer("_atproto.alice.test", &["did=did:plc:123"]);

        let did = resolver(&http, &dns).resolve_handle("alice.test").await.unwrap();

        assert_eq!(did, Did::Plc("123".to_string()));
        assert!(http.requests().is_empty());
        assert_eq!(dns.queries(), vec!["_atproto.alice.test".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_handle_falls_back_to_well_known_once() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond("https://bob.test/.well-known/atproto-did", 200, "did:web:bob.test");

        let did = resolver(&http, &dns).resolve_handle("bob.test").await.unwrap();

        assert_eq!(did, Did::Web("bob.test".to_string()));
        assert_eq!(
            http.requests(),
            vec!["https://bob.test/.well-known/atproto-did".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resolve_handle_dns_failure_falls_back() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        dns.fail("_atproto.carol.test");
        http.respond("https://carol.test/.well-known/atproto-did", 200, "did:plc:carol");

        let did = resolver(&http, &dns).resolve_handle("carol.test").await.unwrap();
        assert_eq!(did.to_string(), "did:plc:carol");
    }

    #[tokio::test]
    async fn test_resolve_handle_well_known_is_not_trimmed() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond("https://dave.test/.well-known/atproto-did", 200, "did:plc:dave\n");

        let did = resolver(&http, &dns).resolve_handle("dave.test").await.unwrap();
        assert_eq!(did.identifier(), "dave\n");
    }

    #[tokio::test]
    async fn test_resolve_handle_unreachable_fallback() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());

        let err = resolver(&http, &dns)
            .resolve_handle("nobody.test")
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::HandleUnresolvable(ref h) if h == "nobody.test"));
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_handle_fallback_not_found() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond("https://gone.test/.well-known/atproto-did", 404, "Not Found");

        let err = resolver(&http, &dns).resolve_handle("gone.test").await.unwrap_err();
        assert!(matches!(err, IdentityError::HandleUnresolvable(_)));
    }

    #[tokio::test]
    async fn test_resolve_handle_malformed_txt() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        dns.answer("_atproto.weird.test", &["v=spf1 -all"]);

        let err = resolver(&http, &dns).resolve_handle("weird.test").await.unwrap_err();

        assert!(matches!(err, IdentityError::Malformed(_)));
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_handle_malformed_well_known_body() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond("https://html.test/.well-known/atproto-did", 200, "<html></html>");

        let err = resolver(&http, &dns).resolve_handle("html.test").await.unwrap_err();
        assert!(matches!(err, IdentityError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_resolve_plc_did_fetches_directory() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond(
            "https://plc.directory/did:plc:abc",
            200,
            did_document("did:plc:abc", "alice.test", "https://pds.test"),
        );

        let did = Did::parse("did:plc:abc").unwrap();
        let identity = resolver(&http, &dns).resolve_did(&did).await.unwrap();

        assert_eq!(identity.handle, "alice.test");
        assert_eq!(identity.pds_endpoint, "https://pds.test");
        assert_eq!(
            http.requests(),
            vec!["https://plc.directory/did:plc:abc".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resolve_web_did_fetches_well_known_document() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond(
            "https://example.com/.well-known/did.json",
            200,
            did_document("did:web:example.com", "example.com", "https://pds.example.com"),
        );

        let did = Did::parse("did:web:example.com").unwrap();
        let identity = resolver(&http, &dns).resolve_did(&did).await.unwrap();

        assert_eq!(identity.pds_endpoint, "https://pds.example.com");
        assert_eq!(
            http.requests(),
            vec!["https://example.com/.well-known/did.json".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resolve_actor_unsupported_method_makes_no_requests() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());

        let err = resolver(&http, &dns)
            .resolve_actor("did:key:z6MkhaXgBZD")
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::InvalidDid { .. }));
        assert!(http.requests().is_empty());
        assert!(dns.queries().is_empty());
    }

    #[tokio::test]
    async fn test_document_without_pds_is_invalid() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond(
            "https://plc.directory/did:plc:nopds",
            200,
            r#"{"id": "did:plc:nopds", "alsoKnownAs": ["at://nopds.test"], "service": []}"#,
        );

        let did = Did::parse("did:plc:nopds").unwrap();
        let err = resolver(&http, &dns).resolve_did(&did).await.unwrap_err();

        match err {
            IdentityError::InvalidDid { did, reason } => {
                assert_eq!(did, "did:plc:nopds");
                assert!(reason.contains("PDS"));
            }
            other => panic!("expected InvalidDid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_document_without_handle_is_invalid() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond(
            "https://plc.directory/did:plc:nohandle",
            200,
            r##"{"service": [{"id": "#atproto_pds", "type": "AtprotoPersonalDataServer", "serviceEndpoint": "https://pds.test"}]}"##,
        );

        let did = Did::parse("did:plc:nohandle").unwrap();
        let err = resolver(&http, &dns).resolve_did(&did).await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidDid { .. }));
    }

    #[tokio::test]
    async fn test_document_not_json_is_malformed() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond("https://plc.directory/did:plc:html", 200, "<html>oops</html>");

        let did = Did::parse("did:plc:html").unwrap();
        let err = resolver(&http, &dns).resolve_did(&did).await.unwrap_err();
        assert!(matches!(err, IdentityError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_custom_plc_directory() {
        let http = Arc::new(FakeHttp::new());
        let dns = Arc::new(FakeDns::new());
        http.respond(
            "http://localhost:2582/did:plc:local",
            200,
            did_document("did:plc:local", "local.test", "http://localhost:2583"),
        );

        let resolver =
            IdentityResolver::with_plc_directory(http.clone(), dns, "http://localhost:2582/");
        let identity = resolver.resolve_actor("did:plc:local").await.unwrap();
        assert_eq!(identity.pds_endpoint, "http://localhost:2583");
    }
}
