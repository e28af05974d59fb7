//! Error types for identity resolution

use std::error::Error as StdError;
use std::fmt;

/// A DNS or HTTP request that never produced a response
#[derive(Debug)]
pub struct TransportError {
    target: String,
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(
        target: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }

    /// The URL or DNS name that was being queried
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request to {} failed: {}", self.target, self.source)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

#[derive(Debug)]
pub enum IdentityError {
    /// Neither DNS nor the well-known endpoint produced a DID for the handle
    HandleUnresolvable(String),
    /// Unsupported DID method, or a DID document without a handle or PDS
    InvalidDid { did: String, reason: String },
    /// An upstream server answered with data of the wrong shape
    Malformed(String),
    Transport(TransportError),
}

impl IdentityError {
    pub(crate) fn invalid_did(did: impl fmt::Display, reason: impl Into<String>) -> Self {
        IdentityError::InvalidDid {
            did: did.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::HandleUnresolvable(handle) => {
                write!(f, "Cannot resolve handle: {}", handle)
            }
            IdentityError::InvalidDid { did, reason } => {
                write!(f, "Invalid DID {}: {}", did, reason)
            }
            IdentityError::Malformed(msg) => write!(f, "Malformed upstream data: {}", msg),
            IdentityError::Transport(err) => write!(f, "Transport error: {}", err),
        }
    }
}

impl StdError for IdentityError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            IdentityError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for IdentityError {
    fn from(err: TransportError) -> Self {
        IdentityError::Transport(err)
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
