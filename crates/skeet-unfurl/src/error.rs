//! Terminal failures of a profile or post resolution

use std::fmt;

use atproto_identity::{IdentityError, TransportError};
use atproto_records::RecordError;

#[derive(Debug)]
pub enum ResolutionError {
    /// Neither DNS nor the well-known endpoint yielded a DID
    HandleUnresolvable { handle: String },
    /// Unsupported DID method, or a DID document lacking a handle or PDS
    InvalidDid { did: String, reason: String },
    /// The profile or post being viewed does not exist
    RecordNotFound { uri: String },
    /// An upstream AT Protocol server broke its contract
    MalformedUpstreamData(String),
    Transport(TransportError),
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::HandleUnresolvable { handle } => {
                write!(f, "Cannot resolve handle: {}", handle)
            }
            ResolutionError::InvalidDid { did, reason } => {
                write!(f, "Invalid DID {}: {}", did, reason)
            }
            ResolutionError::RecordNotFound { uri } => write!(f, "Record not found: {}", uri),
            ResolutionError::MalformedUpstreamData(msg) => {
                write!(f, "Malformed upstream data: {}", msg)
            }
            ResolutionError::Transport(err) => write!(f, "Transport error: {}", err),
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IdentityError> for ResolutionError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::HandleUnresolvable(handle) => {
                ResolutionError::HandleUnresolvable { handle }
            }
            IdentityError::InvalidDid { did, reason } => ResolutionError::InvalidDid { did, reason },
            IdentityError::Malformed(msg) => ResolutionError::MalformedUpstreamData(msg),
            IdentityError::Transport(err) => ResolutionError::Transport(err),
        }
    }
}

impl From<RecordError> for ResolutionError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Malformed(msg) => ResolutionError::MalformedUpstreamData(msg),
            RecordError::Transport(err) => ResolutionError::Transport(err),
        }
    }
}

impl From<TransportError> for ResolutionError {
    fn from(err: TransportError) -> Self {
        ResolutionError::Transport(err)
    }
}

pub type Result<T> = std::result::Result<T, ResolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_display() {
        let err = ResolutionError::RecordNotFound {
            uri: "at://did:plc:123/app.bsky.feed.post/3kabc".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Record not found: at://did:plc:123/app.bsky.feed.post/3kabc"
        );
    }

    #[test]
    fn test_identity_errors_keep_their_kind() {
        let err: ResolutionError =
            IdentityError::HandleUnresolvable("alice.test".to_string()).into();
        assert!(matches!(err, ResolutionError::HandleUnresolvable { ref handle } if handle == "alice.test"));

        let err: ResolutionError = IdentityError::Malformed("bad TXT".to_string()).into();
        assert!(matches!(err, ResolutionError::MalformedUpstreamData(_)));
    }

    #[test]
    fn test_record_errors_map_to_malformed() {
        let err: ResolutionError = RecordError::Malformed("not json".to_string()).into();
        assert_eq!(format!("{}", err), "Malformed upstream data: not json");
    }
}
