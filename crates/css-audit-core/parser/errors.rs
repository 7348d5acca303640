//! Parse faults and recoverable parse issues
//!
//! A [`ParseError`] marks a stylesheet as partial; it is stored on the
//! stylesheet rather than returned, because the rules collected before the
//! fault are still valid. [`ParseIssue`]s record oddities that were skipped
//! over without affecting the rule list.

use core::fmt;

use thiserror::Error;

/// Fault that cut a parse short.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseError {
    /// End of input reached inside a block
    #[error("Unterminated block opened at line {line}: {depth} unclosed brace(s) at end of input")]
    UnterminatedBlock {
        /// Line of the outermost unclosed `{`
        line: usize,
        /// Brace depth remaining at end of input
        depth: usize,
    },

    /// Input exceeds the configured size limit
    #[error("Input size {size} bytes exceeds limit {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },
}

/// Severity of a recoverable parse issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IssueSeverity {
    /// Informational, nothing was lost
    Info,
    /// Input was skipped or reinterpreted
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// What the scanner tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IssueKind {
    /// `/*` without a closing `*/`; the rest of the input was treated as comment
    UnterminatedComment,
    /// String literal cut off by a newline
    UnterminatedString,
    /// `}` with no open block
    StrayCloseBrace,
    /// Text after the last block that never opened one
    TrailingContent,
}

/// Recoverable parse issue with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseIssue {
    /// Issue severity level
    pub severity: IssueSeverity,
    /// Issue kind for filtering
    pub kind: IssueKind,
    /// Human-readable message
    pub message: String,
    /// Line number where the issue occurred (1-based)
    pub line: usize,
}

impl ParseIssue {
    /// Create a warning-level issue.
    #[must_use]
    pub const fn warning(kind: IssueKind, message: String, line: usize) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            kind,
            message,
            line,
        }
    }

    /// Create an info-level issue.
    #[must_use]
    pub const fn info(kind: IssueKind, message: String, line: usize) -> Self {
        Self {
            severity: IssueSeverity::Info,
            kind,
            message,
            line,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.severity, self.line, self.message)
    }
}
