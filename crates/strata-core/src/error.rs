//! Error types for date, calendar, and schedule operations.
//!
//! Every variant here describes malformed input. None of them is
//! recoverable by retrying the same call.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A required argument was missing or out of its domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what was wrong.
        reason: String,
    },

    /// Schedule configuration or generation failed.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the failure.
        reason: String,
    },

    /// Tenor string could not be understood.
    #[error("Invalid tenor '{input}': {reason}")]
    InvalidTenor {
        /// The rejected input.
        input: String,
        /// Reason for rejection.
        reason: String,
    },

    /// A convention name could not be parsed.
    #[error("Unknown {kind}: '{input}'")]
    ParseError {
        /// What was being parsed (e.g. "day count convention").
        kind: &'static str,
        /// The rejected input.
        input: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error for a named convention kind.
    #[must_use]
    pub fn parse_error(kind: &'static str, input: impl Into<String>) -> Self {
        Self::ParseError {
            kind,
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_tenor_error() {
        let err = CoreError::invalid_tenor("3X", "unknown unit");
        let msg = err.to_string();
        assert!(msg.contains("3X"));
        assert!(msg.contains("unknown unit"));
    }

    #[test]
    fn test_parse_error() {
        let err = CoreError::parse_error("calendar", "MARS");
        assert_eq!(err.to_string(), "Unknown calendar: 'MARS'");
    }
}
