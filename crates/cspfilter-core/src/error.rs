//! Shared error type across cspfilter crates.

use thiserror::Error;

/// Stable error codes (used in logs and by callers that branch on the kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration source could not be read or parsed.
    BadConfig,
    /// Secure random source unavailable.
    RandomSource,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::RandomSource => "RANDOM_SOURCE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CspError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum CspError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("random source unavailable: {0}")]
    RandomSource(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CspError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CspError::BadConfig(_) => ErrorCode::BadConfig,
            CspError::RandomSource(_) => ErrorCode::RandomSource,
            CspError::Internal(_) => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(CspError::BadConfig("x".into()).code().as_str(), "BAD_CONFIG");
        assert_eq!(CspError::RandomSource("x".into()).code().as_str(), "RANDOM_SOURCE");
        assert_eq!(CspError::Internal("x".into()).code().as_str(), "INTERNAL");
    }

    #[test]
    fn display_carries_detail() {
        let err = CspError::RandomSource("os rng failed".into());
        assert_eq!(err.to_string(), "random source unavailable: os rng failed");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CspError>();
    }
}
