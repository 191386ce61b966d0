//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP request could not be completed (network error or timeout).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success HTTP status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not valid JSON, or not the shape the operation returns.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The API answered but its envelope `status` was not `OK`.
    #[error("API returned status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },
}

impl Error {
    /// True when no answer came back from the server at all.
    ///
    /// Everything else means the API was reachable but the answer was unusable.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::RequestFailed)
    }
}
