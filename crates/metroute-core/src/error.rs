//! Shared error type across metroute crates.

use thiserror::Error;

/// Stable error codes (used in logs and by config tooling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Metric failed validation at construction time.
    InvalidMetric,
    /// Malformed or inconsistent configuration.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidMetric => "INVALID_METRIC",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetrouteError>;

/// Unified error type used by core and aggregator crates.
#[derive(Debug, Error)]
pub enum MetrouteError {
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetrouteError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetrouteError::InvalidMetric(_) => ErrorCode::InvalidMetric,
            MetrouteError::Config(_) => ErrorCode::Config,
            MetrouteError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetrouteError::Internal(_) => ErrorCode::Internal,
        }
    }
}
