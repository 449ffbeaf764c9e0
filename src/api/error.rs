/// Error types for calls against the provisioning API
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The kinds of outbound request a wizard session can have outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Networks,
    Subnets,
    Submission,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Networks => f.write_str("network list"),
            RequestKind::Subnets => f.write_str("subnet list"),
            RequestKind::Submission => f.write_str("load balancer creation"),
        }
    }
}

/// A dependent-resource lookup failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load {kind}: {}", .source.user_message())]
pub struct ResolutionError {
    pub kind: RequestKind,
    #[source]
    pub source: ApiError,
}

impl ResolutionError {
    pub fn new(kind: RequestKind, source: ApiError) -> Self {
        Self { kind, source }
    }

    pub fn user_message(&self) -> String {
        self.source.user_message()
    }
}

/// Errors that can occur when talking to the provisioning API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Transport(String),

    /// A response arrived but its body was not the expected JSON shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Non-2xx status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        /// Remote-supplied message when the body carried one
        message: Option<String>,
    },

    /// 2xx response whose envelope embeds an error object
    #[error("{message}")]
    Application {
        code: Option<String>,
        message: String,
    },
}

impl ApiError {
    /// Best human-readable description: the remote's own message when it
    /// sent one, a generic description otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Application { message, .. } => message.clone(),
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Http { status, message: None } => {
                format!("Remote API returned HTTP {}", status)
            }
            ApiError::Transport(detail) => format!("Could not reach the provisioning API: {}", detail),
            ApiError::Parse(detail) => format!("Unexpected response from the provisioning API: {}", detail),
        }
    }

    /// True when the remote service itself rejected the request, as opposed
    /// to a transport or decoding failure on our side.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, ApiError::Http { .. } | ApiError::Application { .. })
    }
}
