// ── Core error types ──
//
// Domain errors from worldwise-core. Consumers never match on HTTP status
// codes or JSON parse failures directly: `From<worldwise_api::Error>`
// translates transport failures into the variants below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    #[error("Unexpected response: {message}")]
    InvalidResponse { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// A store operation failed and dispatched `rejected`.
    #[error("{reason}")]
    Rejected { reason: String },

    #[error("Cannot navigate to {route}: {reason}")]
    InvalidRoute { route: String, reason: String },

    // ── Service errors (wrapped, not exposed raw) ────────────────────
    #[error("Service error: {message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<worldwise_api::Error> for CoreError {
    fn from(err: worldwise_api::Error) -> Self {
        match err {
            worldwise_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else if err.is_not_found() {
                    CoreError::NotFound {
                        identifier: e.url().map(|u| u.path().to_owned()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            worldwise_api::Error::Http {
                status: 404,
                message,
            } => CoreError::NotFound {
                identifier: message,
            },
            worldwise_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            worldwise_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidResponse { message }
            }
            worldwise_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            worldwise_api::Error::ClientBuild(message) => CoreError::Config { message },
        }
    }
}
