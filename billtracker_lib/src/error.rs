//! Error types for the library layer.

use std::fmt;

use crate::normalize::NormalizerError;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding validation, lookup and configuration failures.
#[derive(Debug)]
pub enum BillTrackerError {
    /// An error from the underlying API client.
    Api(legiscan_api::Error),
    /// JSON serialization or deserialization failed (e.g. a cached entry).
    Serialization(serde_json::Error),
    /// Required user input was missing or malformed. Raised before any network call.
    InvalidInput(String),
    /// The search produced no usable match, or the bill detail was unavailable.
    NotFound(String),
    /// Embedded seed data or environment configuration could not be loaded.
    Config(String),
}

impl fmt::Display for BillTrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BillTrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl BillTrackerError {
    /// Network or timeout failure: the API never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_transport())
    }
}

impl From<legiscan_api::Error> for BillTrackerError {
    fn from(e: legiscan_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for BillTrackerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<NormalizerError> for BillTrackerError {
    fn from(e: NormalizerError) -> Self {
        Self::Config(e.to_string())
    }
}
