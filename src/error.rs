use thiserror::Error;

/// Unified error type for the keeper
#[derive(Error, Debug)]
pub enum KeeperError {
    // Provider errors
    #[error("Address limit exceeded, no more addresses can be allocated")]
    AddressLimitExceeded,

    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Persistence errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid run state: {0}")]
    InvalidState(String),

    // Publication errors
    #[error("Publish failed: {0}")]
    Publish(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Operator input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for keeper operations
pub type Result<T> = std::result::Result<T, KeeperError>;

impl KeeperError {
    /// Whether this error must stop the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, KeeperError::AddressLimitExceeded)
    }
}

// Convert from URL parse errors
impl From<url::ParseError> for KeeperError {
    fn from(err: url::ParseError) -> Self {
        KeeperError::InvalidConfig(err.to_string())
    }
}
