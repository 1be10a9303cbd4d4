use thiserror::Error;

/// Unified error type for msgtm operations
#[derive(Error, Debug)]
pub enum MsgtmError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid version format: '{0}' - expected vMAJOR.MINOR.PATCH")]
    InvalidFormat(String),

    #[error("Version overflow: {0} cannot be bumped any further")]
    VersionOverflow(String),

    #[error("Invalid service tag: '{0}' - expected SERVICE_NAME-vMAJOR.MINOR.PATCH")]
    InvalidServiceTagFormat(String),

    #[error("Invalid service name: '{0}' - only letters, digits and '-' are allowed")]
    InvalidServiceName(String),

    #[error("Tag backend error: {0}")]
    Backend(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("State file error: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in msgtm
pub type Result<T> = std::result::Result<T, MsgtmError>;

impl MsgtmError {
    /// Create a backend error with context
    pub fn backend(msg: impl Into<String>) -> Self {
        MsgtmError::Backend(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        MsgtmError::Remote(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        MsgtmError::NotFound(msg.into())
    }

    /// Create a state persistence error with context
    pub fn state(msg: impl Into<String>) -> Self {
        MsgtmError::State(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MsgtmError::Config(msg.into())
    }
}

impl From<serde_yaml::Error> for MsgtmError {
    fn from(err: serde_yaml::Error) -> Self {
        MsgtmError::State(err.to_string())
    }
}

impl From<serde_json::Error> for MsgtmError {
    fn from(err: serde_json::Error) -> Self {
        MsgtmError::State(err.to_string())
    }
}
