//! Error types for the inspection tool

use std::fmt;

use skeet_unfurl::ResolutionError;

#[derive(Debug)]
pub enum InspectError {
    Resolution(ResolutionError),
    Serialize(serde_json::Error),
    Config(String),
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectError::Resolution(err) => write!(f, "Resolution failed: {}", err),
            InspectError::Serialize(err) => write!(f, "Failed to serialize view: {}", err),
            InspectError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for InspectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InspectError::Resolution(err) => Some(err),
            InspectError::Serialize(err) => Some(err),
            InspectError::Config(_) => None,
        }
    }
}

impl From<ResolutionError> for InspectError {
    fn from(err: ResolutionError) -> Self {
        InspectError::Resolution(err)
    }
}

impl From<serde_json::Error> for InspectError {
    fn from(err: serde_json::Error) -> Self {
        InspectError::Serialize(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for InspectError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        InspectError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
