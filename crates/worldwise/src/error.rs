//! CLI error types with miette diagnostics.
//!
//! Maps core, form, and config errors into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use worldwise_config::ConfigError;
use worldwise_core::{CoreError, FormError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(worldwise::connection_failed),
        help(
            "Check that the cities service is running and accessible.\n\
             Set it with --api-url or api.base_url in the config file."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(worldwise::timeout),
        help("Increase the timeout with --timeout or check the service.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Wrong email or password")]
    #[diagnostic(
        code(worldwise::auth_failed),
        help("The demo account is vy@example.com")
    )]
    AuthFailed,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(worldwise::not_found),
        help("Run: worldwise {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Store ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(worldwise::rejected), help("Run with -v to see the underlying failure."))]
    Rejected { message: String },

    #[error("Service error: {message}")]
    #[diagnostic(code(worldwise::api_error))]
    ApiError { message: String },

    // ── Form ─────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(worldwise::form), help("{help}"))]
    Form { message: String, help: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(worldwise::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(worldwise::config),
        help("Inspect the file with: worldwise config show")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(worldwise::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Form { .. } | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NotFound { identifier } => CliError::NotFound {
                resource_type: "city".into(),
                identifier,
                list_command: "cities list".into(),
            },
            CoreError::Rejected { reason } => CliError::Rejected { message: reason },
            CoreError::InvalidRoute { route, reason } => CliError::Validation {
                field: "link".into(),
                reason: format!("{route}: {reason}"),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::InvalidResponse { message } | CoreError::Api { message, .. } => {
                CliError::ApiError { message }
            }
        }
    }
}

// ── FormError → CliError mapping ─────────────────────────────────────

fn form_help(err: &FormError) -> &'static str {
    match err {
        FormError::NoPosition => "Pass --lat/--lng or a --link carrying lat and lng.",
        FormError::NotACity => "Pick a point inside a city, or pass --no-geocode --name.",
        FormError::MissingCityName => "Pass --name.",
        FormError::Geocoding(_) => "Retry, or pass --no-geocode --name.",
        FormError::Rejected { .. } | FormError::Core(_) => "",
    }
}

impl From<FormError> for CliError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Rejected { reason } => CliError::Rejected { message: reason },
            FormError::Core(core) => core.into(),
            other => CliError::Form {
                help: form_help(&other).into(),
                message: other.to_string(),
            },
        }
    }
}
