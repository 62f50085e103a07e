//! Error types for formatter execution.

use thiserror::Error;

/// Result type for formatter operations.
pub type FormatterResult<T> = Result<T, FormatterError>;

/// Errors produced by individual formatters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatterError {
    /// A built-in pattern failed to compile.
    #[error("formatter '{formatter}' has an invalid pattern: {reason}")]
    InvalidPattern {
        /// Formatter name.
        formatter: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// The transformation could not be applied.
    #[error("formatter '{formatter}' failed: {reason}")]
    Transform {
        /// Formatter name.
        formatter: String,
        /// Failure description.
        reason: String,
    },

    /// The formatter panicked while transforming text.
    #[error("formatter '{formatter}' panicked: {reason}")]
    Panicked {
        /// Formatter name.
        formatter: String,
        /// Panic payload, when it was a string.
        reason: String,
    },
}

impl FormatterError {
    /// Builds a [`Self::Transform`] error from any displayable cause.
    pub fn transform(formatter: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transform {
            formatter: formatter.into(),
            reason: reason.to_string(),
        }
    }

    /// Builds a [`Self::InvalidPattern`] error from a regex diagnostic.
    pub fn invalid_pattern(formatter: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            formatter: formatter.into(),
            reason: reason.to_string(),
        }
    }
}

/// Record of one formatter failure during pipeline processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterFailure {
    formatter: String,
    error: FormatterError,
}

impl FormatterFailure {
    /// Creates a failure record.
    #[must_use]
    pub const fn new(formatter: String, error: FormatterError) -> Self {
        Self { formatter, error }
    }

    /// Returns the name of the formatter that failed.
    #[must_use]
    pub fn formatter(&self) -> &str {
        &self.formatter
    }

    /// Returns the failure.
    #[must_use]
    pub const fn error(&self) -> &FormatterError {
        &self.error
    }
}
