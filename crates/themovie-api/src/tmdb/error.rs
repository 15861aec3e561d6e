//! TMDB request failure kinds.

/// Root cause of a failed TMDB lookup.
///
/// Lookups return `anyhow::Result`; recover the kind with
/// `err.downcast_ref::<TmdbError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// Connection, DNS, TLS or body read failure.
    Transport {
        /// Endpoint path.
        path: String,
        /// Underlying error message.
        message: String,
    },
    /// Non-success HTTP status.
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_code` from the error body, if it decoded.
        code: Option<u32>,
        /// TMDB `status_message`, or the raw body.
        message: String,
    },
    /// The body did not match the expected JSON structure.
    Decode {
        /// Endpoint path.
        path: String,
        /// Decoder error message.
        message: String,
    },
    /// The body decoded but is not a usable response.
    InvalidResponse {
        /// Endpoint path.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl std::fmt::Display for TmdbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { path, message } => {
                write!(f, "TMDB request failed: {path}: {message}")
            }
            Self::Status {
                status,
                code: Some(code),
                message,
            } => write!(
                f,
                "TMDB API error (HTTP {status}): code={code}, message={message}"
            ),
            Self::Status {
                status,
                code: None,
                message,
            } => write!(f, "TMDB API error (HTTP {status}): {message}"),
            Self::Decode { path, message } => {
                write!(f, "failed to decode JSON response: {path}: {message}")
            }
            Self::InvalidResponse { path, reason } => {
                write!(f, "invalid TMDB response: {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for TmdbError {}
