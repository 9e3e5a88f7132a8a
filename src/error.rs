use thiserror::Error;

// =========================================================
// Client-side validation
// =========================================================

/// Form and file checks that run before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required!")]
    Required { field: &'static str },

    #[error("Enter a valid email address!")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long!")]
    PasswordTooShort { min: usize },

    #[error("{field} must be a non-negative number")]
    InvalidNumber { field: &'static str },

    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("CSV line {line}: {reason}")]
    Csv { line: u64, reason: String },
}

// =========================================================
// Request errors
// =========================================================

/// Everything a call into the API can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No response arrived (DNS, connection, CORS, aborted fetch).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("http {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login or session restore was refused.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A body did not match the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn http(status: u16, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// HTTP status, when the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the server (or by the auth layer), if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Http { message, .. } => message.as_deref(),
            ClientError::Auth(message) => Some(message),
            _ => None,
        }
    }

    /// Text suitable for a user-facing notice.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(err) => err.to_string(),
            _ => self.server_message().unwrap_or(fallback).to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
