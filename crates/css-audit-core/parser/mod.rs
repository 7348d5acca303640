//! Brace-aware stylesheet parser
//!
//! Turns raw stylesheet text into an ordered list of [`Rule`]s. The parser is
//! deliberately shallow: a rule is a selector (or at-rule prelude) plus the
//! verbatim text between its braces. Grouping constructs such as `@media`
//! keep their inner rules as one opaque body, which fixes the granularity the
//! cascade merger works at.
//!
//! # Pipeline
//!
//! 1. Comments are removed, keeping their newlines so line numbers hold.
//! 2. The scanner walks the text with a brace-depth counter. String literals
//!    are masked for depth counting only, so `content: "{"` never opens a
//!    block while the body still keeps the literal text.
//! 3. Blocks become rules with a normalized selector and a [`ScopeKind`]
//!    inferred from the selector prefix. Rules with an empty selector or body
//!    are dropped.
//!
//! Unbalanced input never discards work: every rule closed before the fault
//! is returned and the stylesheet is flagged partial.
//!
//! # Example
//!
//! ```rust
//! use css_audit_core::parser::{ScopeKind, SourceId, Stylesheet};
//!
//! let sheet = Stylesheet::parse(
//!     SourceId(0),
//!     "@media (max-width: 600px) { .a { b: c; } }\n.open { color: red;",
//! );
//!
//! assert!(sheet.is_partial());
//! assert_eq!(sheet.rules().len(), 1);
//! assert_eq!(sheet.rules()[0].scope_kind(), ScopeKind::Media);
//! ```

pub mod declaration;
pub mod errors;
pub mod rule;
mod scanner;
pub mod split;
pub mod stylesheet;

pub use declaration::{declarations, Declaration};
pub use errors::{IssueKind, IssueSeverity, ParseError, ParseIssue};
pub use rule::{normalize_selector, theme_name, to_css, Rule, ScopeKind, SourceId};
pub use split::ThemeSplit;
pub use stylesheet::{ParserConfig, Stylesheet, StylesheetStats};

/// Attribute that names theme scopes unless configured otherwise.
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-theme";
