//! In-memory transports that record every request

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::transport::{DnsTxtResolver, HttpClient, HttpResponse};

/// Canned HTTP responses keyed by exact URL.
///
/// Unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct FakeHttp {
    routes: Mutex<HashMap<String, Option<HttpResponse>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: impl Into<String>) {
        let response = HttpResponse {
            status,
            body: body.into(),
        };
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Some(response));
    }

    /// Make requests to `url` fail at the transport layer
    pub fn fail(&self, url: &str) {
        self.routes.lock().unwrap().insert(url.to_string(), None);
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.lock().unwrap().get(url) {
            Some(Some(response)) => Ok(response.clone()),
            Some(None) => Err(TransportError::new(url, "connection reset")),
            None => Err(TransportError::new(url, "no route to host")),
        }
    }
}

/// Canned TXT answers keyed by DNS name. Unknown names have no records.
#[derive(Default)]
pub struct FakeDns {
    answers: Mutex<HashMap<String, Option<Vec<String>>>>,
    queries: Mutex<Vec<String>>,
}

impl FakeDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, name: &str, records: &[&str]) {
        let records = records.iter().map(|r| r.to_string()).collect();
        self.answers
            .lock()
            .unwrap()
            .insert(name.to_string(), Some(records));
    }

    /// Make lookups of `name` fail (SERVFAIL, timeout...)
    pub fn fail(&self, name: &str) {
        self.answers.lock().unwrap().insert(name.to_string(), None);
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsTxtResolver for FakeDns {
    async fn txt_records(&self, name: &str) -> Result<Vec<String>, TransportError> {
        self.queries.lock().unwrap().push(name.to_string());
        match self.answers.lock().unwrap().get(name) {
            Some(Some(records)) => Ok(records.clone()),
            Some(None) => Err(TransportError::new(name, "SERVFAIL")),
            None => Ok(Vec::new()),
        }
    }
}

/// A minimal DID document naming one handle and one PDS
pub fn did_document(did: &str, handle: &str, pds: &str) -> String {
    serde_json::json!({
        "@context": ["https://www.w3.org/ns/did/v1"],
        "id": did,
        "alsoKnownAs": [format!("at://{handle}")],
        "service": [{
            "id": "#atproto_pds",
            "type": "AtprotoPersonalDataServer",
            "serviceEndpoint": pds,
        }],
    })
    .to_string()
}
