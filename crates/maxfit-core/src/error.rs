//! Shared error type across MaxFit crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No valid session.
    AuthFailed,
    /// Referenced record does not exist.
    NotFound,
    /// Not allowed by plan policy.
    NotAllowed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MaxFitError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MaxFitError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MaxFitError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MaxFitError::BadRequest(_) => ClientCode::BadRequest,
            MaxFitError::AuthFailed => ClientCode::AuthFailed,
            MaxFitError::NotFound(_) => ClientCode::NotFound,
            MaxFitError::NotAllowed(_) => ClientCode::NotAllowed,
            MaxFitError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MaxFitError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Human-readable detail without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            MaxFitError::BadRequest(m)
            | MaxFitError::NotFound(m)
            | MaxFitError::NotAllowed(m)
            | MaxFitError::Internal(m) => m.clone(),
            other => other.to_string(),
        }
    }
}
