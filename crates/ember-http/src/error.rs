//! Error types for ember-http.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A query, header or body parameter had a shape that cannot be sent.
    #[error("unsupported {kind} parameter: {reason}")]
    ParameterType { kind: &'static str, reason: String },

    /// Opening, reading or copying an upload source failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source:  io::Error,
    },

    /// Malformed target URL, proxy URL, or an option combination the
    /// transport cannot honor.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Dial, TLS, timeout or protocol failure reported by the transport.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn parameter(kind: &'static str, reason: impl Into<String>) -> Self {
        Error::ParameterType {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the transport gave up because the call timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network(e) if e.is_timeout())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self { Error::Configuration(format!("invalid URL: {e}")) }
}

pub type Result<T> = std::result::Result<T, Error>;
