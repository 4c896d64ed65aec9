//! Error types for the DJ session

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end an interaction
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required credential or endpoint is not configured
    #[error("Missing configuration: {0}")]
    MissingCredential(String),

    /// A configuration value was rejected at the boundary
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// The HTTP request could not be completed
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The upstream API answered with a non-success status
    #[error("API error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream API answered with something we could not use
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid-setting error
    pub fn invalid_setting(msg: impl Into<String>) -> Self {
        Self::InvalidSetting(msg.into())
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Error::Upstream { status, body }
            }
            ureq::Error::Transport(transport) => Error::Transport(transport.to_string()),
        }
    }
}
