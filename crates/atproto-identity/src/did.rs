use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{IdentityError, Result};

/// A DID of one of the two methods AT Protocol supports.
///
/// Each variant holds the method-specific identifier, exactly as written
/// in the DID (a `did:web` id keeps its `%3A` port escape).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Did {
    Plc(String),
    Web(String),
}

impl Did {
    pub fn parse(did: &str) -> Result<Self> {
        let (method, id) = if let Some(id) = did.strip_prefix("did:plc:") {
            ("plc", id)
        } else if let Some(id) = did.strip_prefix("did:web:") {
            ("web", id)
        } else {
            return Err(IdentityError::invalid_did(did, "unsupported DID method"));
        };

        if id.is_empty() {
            return Err(IdentityError::invalid_did(
                did,
                format!("empty did:{method} identifier"),
            ));
        }

        Ok(match method {
            "plc" => Did::Plc(id.to_string()),
            _ => Did::Web(id.to_string()),
        })
    }

    pub fn method(&self) -> &'static str {
        match self {
            Did::Plc(_) => "plc",
            Did::Web(_) => "web",
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Did::Plc(id) | Did::Web(id) => id,
        }
    }

    /// Host (and optional port) serving a `did:web` document
    pub fn web_domain(&self) -> Option<String> {
        match self {
            Did::Web(id) => Some(id.replace("%3A", ":")),
            Did::Plc(_) => None,
        }
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "did:{}:{}", self.method(), self.identifier())
    }
}

impl FromStr for Did {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        Did::parse(s)
    }
}

impl Serialize for Did {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plc() {
        let did = Did::parse("did:plc:ewvi7nxzyoun6zhxrhs64oiz").unwrap();
        assert_eq!(did, Did::Plc("ewvi7nxzyoun6zhxrhs64oiz".to_string()));
        assert_eq!(did.to_string(), "did:plc:ewvi7nxzyoun6zhxrhs64oiz");
    }

    #[test]
    fn test_parse_web_with_port() {
        let did = Did::parse("did:web:localhost%3A8080").unwrap();
        assert_eq!(did.method(), "web");
        assert_eq!(did.web_domain().as_deref(), Some("localhost:8080"));
        assert_eq!(did.to_string(), "did:web:localhost%3A8080");
    }

    #[test]
    fn test_parse_rejects_other_methods() {
        for input in ["did:key:z6Mk", "did:example:123", "alice.test", ""] {
            match Did::parse(input) {
                Err(IdentityError::InvalidDid { did, .. }) => assert_eq!(did, input),
                other => panic!("expected InvalidDid for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_rejects_empty_identifier() {
        assert!(matches!(
            Did::parse("did:plc:"),
            Err(IdentityError::InvalidDid { .. })
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let did: Did = "did:plc:123".parse().unwrap();
        assert_eq!(serde_json::to_string(&did).unwrap(), "\"did:plc:123\"");
    }
}
