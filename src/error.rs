//! Error types and handling for the Filelocker client
//!
//! Every operation in the library returns [`Result`]. The variants group into
//! five classes: configuration, transport, decode, authentication and remote
//! application errors. The CLI maps each class onto a process exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Filelocker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Filelocker client and CLI operations
#[derive(Error, Debug)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════
    // Configuration Errors
    // ═══════════════════════════════════════════════════════════════
    /// Base URL could not be parsed or is not http(s)
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Duration string could not be parsed
    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// Duration string as given
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read configuration file
    #[error("Failed to read config from {path}: {reason}")]
    ConfigRead {
        /// Config file path
        path: PathBuf,
        /// Underlying read or parse error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    // ═══════════════════════════════════════════════════════════════
    // Network & HTTP Errors
    // ═══════════════════════════════════════════════════════════════
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to connect to the Filelocker server
    #[error("Failed to connect to {host}: {reason}")]
    ConnectionError {
        /// Host that could not be reached
        host: String,
        /// Underlying connection error
        reason: String,
    },

    /// Request exceeded the client timeout
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ═══════════════════════════════════════════════════════════════
    // Decode Errors
    // ═══════════════════════════════════════════════════════════════
    /// Response body was not well-formed for the expected format
    #[error("Invalid {format} response: {reason}")]
    Decode {
        /// Wire format, `XML` or `JSON`
        format: &'static str,
        /// Parser error
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════
    // Authentication
    // ═══════════════════════════════════════════════════════════════
    /// Login succeeded at the HTTP level but returned no request origin
    #[error("Login did not return a request origin; check the login id and API key")]
    NoOrigin,

    /// Server reported errors during login
    #[error("Login rejected by server: {}", .0.join("; "))]
    LoginRejected(Vec<String>),

    // ═══════════════════════════════════════════════════════════════
    // Remote Application Errors
    // ═══════════════════════════════════════════════════════════════
    /// The service answered with a non-empty error message list
    #[error("{action}: {}", .errors.join("; "))]
    Remote {
        /// What the client was doing
        action: &'static str,
        /// Error messages from the service
        errors: Vec<String>,
        /// Informational messages returned alongside
        info: Vec<String>,
    },

    // ═══════════════════════════════════════════════════════════════
    // I/O Errors
    // ═══════════════════════════════════════════════════════════════
    /// Local file operation failed
    #[error("File operation failed: {path}: {reason}")]
    FileError {
        /// Local file path
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },

    /// Reading upload content or another local stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidUrl { .. }
            | Self::InvalidDuration { .. }
            | Self::InvalidConfig(_)
            | Self::ConfigRead { .. }
            | Self::MissingArgument(_) => 2,
            Self::NoOrigin | Self::LoginRejected(_) => 3,
            Self::ConnectionError { .. } | Self::Http(_) => 4,
            Self::Decode { .. } => 5,
            Self::Remote { .. } => 6,
            Self::Timeout(_) => 124,
            Self::FileError { .. } | Self::Io(_) => 1,
        }
    }

    /// Whether the error is an authentication failure
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::NoOrigin | Self::LoginRejected(_))
    }

    /// Error messages reported by the service, if this is a remote error
    #[must_use]
    pub fn remote_errors(&self) -> &[String] {
        match self {
            Self::Remote { errors, .. } | Self::LoginRejected(errors) => errors,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionError {
                host: err
                    .url()
                    .and_then(|u| u.host_str().map(ToString::to_string))
                    .unwrap_or_else(|| "<unknown>".to_string()),
                reason: err.to_string(),
            }
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            Self::Decode {
                format: "JSON",
                reason: format!("syntax error: {err}"),
            }
        } else {
            Self::Decode {
                format: "JSON",
                reason: err.to_string(),
            }
        }
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Self::Decode {
            format: "XML",
            reason: err.to_string(),
        }
    }
}
