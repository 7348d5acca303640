//! Core error type for css-audit operations
//!
//! Parser faults are values on [`crate::Stylesheet`], merge and audit findings
//! are values too. `CoreError` covers the few operations that can refuse to
//! run at all, and wraps `ParseError` for callers that want to escalate a
//! partial parse into a hard failure.

use thiserror::Error;

use crate::parser::ParseError;

/// Main error type for css-audit core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A parse fault escalated by the caller
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A pattern in the script catalog failed to compile
    #[error("Invalid pattern '{id}': {message}")]
    InvalidPattern { id: &'static str, message: String },

    /// Configuration value rejected
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create configuration error from message.
    pub fn config<T: core::fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Check if the run can continue past this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_converts() {
        let err: CoreError = ParseError::UnterminatedBlock { line: 3, depth: 1 }.into();
        assert!(matches!(err, CoreError::Parse(_)));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn config_errors_are_recoverable() {
        let err = CoreError::config("unknown severity 'loud'");
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Configuration error: unknown severity 'loud'");
    }

    #[test]
    fn pattern_error_display() {
        let err = CoreError::InvalidPattern {
            id: "markup-class",
            message: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid pattern 'markup-class': unclosed group"
        );
    }
}
