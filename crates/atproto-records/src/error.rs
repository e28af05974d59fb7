//! Error types for record fetching

use std::fmt;

use atproto_identity::TransportError;

#[derive(Debug)]
pub enum RecordError {
    Transport(TransportError),
    /// The PDS answered with something that is not a getRecord body
    Malformed(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Transport(err) => write!(f, "Transport error: {}", err),
            RecordError::Malformed(msg) => write!(f, "Malformed record: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for RecordError {
    fn from(err: TransportError) -> Self {
        RecordError::Transport(err)
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = RecordError::Malformed("expected value at line 1".to_string());
        assert_eq!(
            format!("{}", err),
            "Malformed record: expected value at line 1"
        );
    }

    #[test]
    fn test_error_is_debug() {
        let err = RecordError::Malformed("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Malformed"));
    }
}
