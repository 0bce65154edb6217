use std::error::Error as StdError;

use thiserror::Error;

/// All possible errors raised by the KYC client
#[derive(Debug, Error)]
pub enum KycError {
    /// Required input missing or unusable. Raised before any network activity.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced a usable response: DNS, refused connection,
    /// TLS failure, timeout, or a non-2xx status when status errors are enabled.
    #[error("Request error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// A response arrived but its body is not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, KycError>;

impl KycError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
            status: None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// HTTP status attached to a transport failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for KycError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's top-level message hides the root cause (e.g. "connection refused")
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::Transport {
            message,
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<::config::ConfigError> for KycError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
