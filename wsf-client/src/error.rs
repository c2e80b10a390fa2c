//! Client error types.

use std::path::PathBuf;

/// Errors reported for a WSF API call.
#[derive(Debug, thiserror::Error)]
pub enum WsfError {
    /// The transport failed before a usable response was received
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The body could not be parsed as JSON
    #[error("Status Code: {status}")]
    Parse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The payload carried a top-level `errors` field
    #[error("API error: {0}")]
    Api(serde_json::Value),

    /// Well-formed payload but a non-200 status
    #[error("Status Code: {status}")]
    Status { status: u16 },

    /// A successful payload did not match the requested type
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The client could not be configured
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WsfError {
    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            WsfError::Parse { status, .. } | WsfError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by a [`Transport`](crate::wsf::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// reqwest failed (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other transport failure, e.g. from a test transport
    #[error("{0}")]
    Other(String),
}

/// Errors building a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Options file could not be read
    #[error("failed to read options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options document is not valid JSON
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A configured header cannot be sent
    #[error("invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WsfError::Status { status: 500 };
        assert_eq!(err.to_string(), "Status Code: 500");
        assert_eq!(err.status(), Some(500));

        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = WsfError::Parse {
            status: 502,
            source,
        };
        assert_eq!(err.to_string(), "Status Code: 502");
        assert!(std::error::Error::source(&err).is_some());

        let err = WsfError::Api(serde_json::json!(["bad terminal"]));
        assert_eq!(err.to_string(), r#"API error: ["bad terminal"]"#);
        assert_eq!(err.status(), None);

        let err = WsfError::from(TransportError::Other("connection refused".into()));
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = WsfError::from(ConfigError::InvalidHeader {
            name: "User-Agent".into(),
            message: "invalid byte".into(),
        });
        assert_eq!(err.to_string(), "invalid header User-Agent: invalid byte");
    }
}
