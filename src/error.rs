//! Basecamp Error Types
//!
//! Every failure of the client is returned to the caller as a [`BasecampError`].

use thiserror::Error;

/// Main error type for Basecamp operations
#[derive(Debug, Error)]
pub enum BasecampError {
    /// Credentials are incomplete, or the server rejected them
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The request could not be delivered or the server answered with an error status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body is not well-formed XML, or a conversion failed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors (unreadable file, invalid JSON, unknown format)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The async runtime behind the blocking client could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl BasecampError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, BasecampError::Authentication(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, BasecampError::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, BasecampError::Parse(_))
    }
}

impl From<reqwest::Error> for BasecampError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BasecampError::Transport(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            BasecampError::Transport(format!("Connection failed: {}", err))
        } else if err.is_decode() || err.is_body() {
            BasecampError::Transport(format!("Failed to read response body: {}", err))
        } else {
            BasecampError::Transport(err.to_string())
        }
    }
}

impl From<quick_xml::Error> for BasecampError {
    fn from(err: quick_xml::Error) -> Self {
        BasecampError::Parse(format!("Malformed XML: {}", err))
    }
}

impl From<serde_json::Error> for BasecampError {
    fn from(err: serde_json::Error) -> Self {
        BasecampError::Parse(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for BasecampError {
    fn from(err: std::io::Error) -> Self {
        BasecampError::Config(format!("IO error: {}", err))
    }
}

/// Result type alias for Basecamp operations
pub type Result<T> = std::result::Result<T, BasecampError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = BasecampError::Authentication("missing password".to_string());
        assert_eq!(err.to_string(), "Authentication failed: missing password");

        let err = BasecampError::Parse("unexpected end".to_string());
        assert_eq!(err.to_string(), "Parse error: unexpected end");

        let err = BasecampError::Runtime("no reactor".to_string());
        assert_eq!(err.to_string(), "Runtime error: no reactor");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(BasecampError::Transport("refused".into()).is_transport());
        assert!(!BasecampError::Transport("refused".into()).is_parse());
        assert!(BasecampError::Authentication("no user".into()).is_authentication());
    }

    #[test]
    fn test_io_error_is_config() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BasecampError = io.into();
        assert!(matches!(err, BasecampError::Config(msg) if msg.contains("gone")));
    }
}
