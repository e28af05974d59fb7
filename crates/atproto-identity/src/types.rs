use serde::{Deserialize, Serialize};

use crate::did::Did;

const PDS_SERVICE_ID: &str = "#atproto_pds";
const PDS_SERVICE_TYPE: &str = "AtprotoPersonalDataServer";

/// Where an actor's repository lives and what it is called
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdsIdentity {
    pub did: Did,
    pub handle: String,
    pub pds_endpoint: String,
}

/// DID Document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DidDocument {
    pub(crate) also_known_as: Option<Vec<String>>,
    pub(crate) service: Option<Vec<DidService>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DidService {
    #[serde(default)]
    pub(crate) id: String,
    #[serde(rename = "type", default)]
    pub(crate) service_type: String,
    #[serde(default)]
    pub(crate) service_endpoint: serde_json::Value,
}

impl DidDocument {
    /// Handle from the first `at://` alias
    pub(crate) fn handle(&self) -> Option<&str> {
        self.also_known_as
            .as_ref()?
            .iter()
            .find(|aka| aka.starts_with("at://"))
            .map(|aka| &aka["at://".len()..])
            .filter(|handle| !handle.is_empty())
    }

    /// Endpoint of the first `#atproto_pds` service
    pub(crate) fn pds_endpoint(&self) -> Option<&str> {
        self.service
            .as_ref()?
            .iter()
            .find(|s| s.id == PDS_SERVICE_ID && s.service_type == PDS_SERVICE_TYPE)
            .and_then(|s| s.service_endpoint.as_str())
            .filter(|endpoint| !endpoint.is_empty())
    }
}
