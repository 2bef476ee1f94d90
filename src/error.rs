//! Error types for Chalk

use std::fmt;

use thiserror::Error;

/// Result type alias for Chalk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories for a transport call.
///
/// The kind tells the caller whether retrying the turn makes sense
/// (rate-limit and network failures are transient, auth is not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Auth,
    RateLimit,
    Network,
    MalformedResponse,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::Auth => "auth",
            TransportKind::RateLimit => "rate-limit",
            TransportKind::Network => "network",
            TransportKind::MalformedResponse => "malformed-response",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in Chalk
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transport error ({kind}): {message}")]
    Transport {
        kind: TransportKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a transport failure of the given kind.
    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        Error::Transport {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            TransportKind::MalformedResponse
        } else {
            TransportKind::Network
        };
        Error::Transport {
            kind,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_kind_display() {
        assert_eq!(TransportKind::Auth.to_string(), "auth");
        assert_eq!(TransportKind::RateLimit.to_string(), "rate-limit");
        assert_eq!(
            TransportKind::MalformedResponse.to_string(),
            "malformed-response"
        );
    }

    #[test]
    fn test_transport_error_message() {
        let err = Error::transport(TransportKind::Network, "connection reset");
        assert_eq!(
            err.to_string(),
            "Transport error (network): connection reset"
        );
    }
}
