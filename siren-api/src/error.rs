//! Error types for the Monster Siren API client.

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::client::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when interacting with the Monster Siren API.
#[derive(Debug, Error)]
pub enum SirenError {
    /// A required string parameter was empty or whitespace-only.
    ///
    /// Raised before any request is sent.
    #[error("argument `{name}` must not be blank")]
    InvalidArgument {
        /// Name of the offending parameter (`cid`, `keyword`, `last_cid`).
        name: &'static str,
    },

    /// Network-level failure: DNS, connection refused, timeout, TLS,
    /// or a non-2xx HTTP status. The response envelope was never reached.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The envelope decoded but carried a non-zero `code` for an operation
    /// keyed by caller input (a cid or a search keyword).
    #[error("server rejected `{}` (code {code}): {message}", .target.as_deref().unwrap_or("?"))]
    ServerRejected {
        /// API status code (not the HTTP status).
        code: i64,
        /// Message from the `msg` field, verbatim.
        message: String,
        /// The cid or keyword the request was made for.
        target: Option<String>,
    },

    /// The envelope decoded but carried a non-zero `code` for an operation
    /// with no caller-supplied input (bulk listing, recommendations).
    #[error("operation failed (code {code}): {message}")]
    Operational {
        /// API status code (not the HTTP status).
        code: i64,
        /// Message from the `msg` field, verbatim.
        message: String,
    },

    /// The body was not valid JSON, or a successful payload did not match
    /// the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope reported success (`code == 0`) but carried no payload.
    #[error("`{endpoint}` reported success without a payload")]
    MissingPayload {
        /// Request path the empty envelope came from.
        endpoint: String,
    },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for SirenError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl SirenError {
    /// Whether retrying the same call could plausibly succeed.
    ///
    /// Only transport failures qualify; every other kind is deterministic
    /// for a given input and server state.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The envelope status code, for errors that carry one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::ServerRejected { code, .. } | Self::Operational { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Convenience alias for `Result<T, SirenError>`.
pub type Result<T> = std::result::Result<T, SirenError>;
