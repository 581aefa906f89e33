// src/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status. `message` is the server's `error` field when it sent one.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 and 403 both mean the capability token was refused.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_FAILURE",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Validation(_) => "VALIDATION_FAILURE",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
