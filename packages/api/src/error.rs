//! Error type shared by every remote call.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The login (or register) response did not carry a usable token. The
    /// server was reachable but did not grant a session.
    #[error("invalid auth response")]
    InvalidAuthResponse,

    /// The request never produced a response (DNS, connection, TLS, timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("invalid endpoint {path}: {reason}")]
    InvalidEndpoint { path: String, reason: String },

    /// Auth handlers can be registered once per client.
    #[error("auth handlers are already registered on this client")]
    AuthAlreadyRegistered,

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_auth_response_message() {
        assert_eq!(ApiError::InvalidAuthResponse.to_string(), "invalid auth response");
    }

    #[test]
    fn test_status_accessors() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "{\"message\":\"expired\"}".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(!err.is_unauthorized());
        assert_eq!(ApiError::AuthAlreadyRegistered.status(), None);
    }
}
