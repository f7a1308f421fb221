use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Service error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason an authenticator refused a request.
///
/// This is a signal handed to the entry point, not an error that gets
/// rendered. The entry point does not look at which variant it receives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationFailure {
    #[error("Missing authentication credentials")]
    MissingCredentials,

    #[error("Credentials have expired")]
    ExpiredCredentials,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Unsupported authorization scheme: {0}")]
    UnsupportedScheme(String),
}
