//! # css-audit core
//!
//! Structural model, cascade merger and identifier integrity analyzer for
//! stylesheets. Parses stylesheet text into an ordered list of opaque rules,
//! merges several precedence-ordered stylesheets into one deduplicated result,
//! diffs scoped custom properties and cross-checks animation references
//! against keyframe definitions.
//!
//! ## Features
//!
//! - **Brace-aware parsing**: comments stripped, string literals masked,
//!   partial results kept on unbalanced input
//! - **Cascade merge**: first-occurrence order, highest-precedence content,
//!   conflict records for every overridden selector
//! - **Scoped variables**: `:root` and `[data-theme="…"]` custom property maps
//!   with missing/extra/changed diffs
//! - **Animation bindings**: missing and unused `@keyframes`
//! - **Integrity scoring**: preserved/missing/extra identifiers per category
//! - **Script heuristics**: best-effort identifier references from script
//!   text (`script` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use css_audit_core::{merge::CascadeMerger, Stylesheet, SourceId};
//!
//! let base = Stylesheet::parse(SourceId(0), ".card { color: red; }\n.btn { padding: 0; }");
//! let theme = Stylesheet::parse(SourceId(1), ".card { color: blue; }");
//!
//! let merged = CascadeMerger::new().merge([base.rules(), theme.rules()]);
//! assert_eq!(merged.rules().len(), 2);
//! assert_eq!(merged.rules()[0].body(), "color: blue;");
//! assert_eq!(merged.conflicts().len(), 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod analysis;
pub mod merge;
pub mod parser;
pub mod utils;

pub use analysis::{
    AnalysisConfig, Category, CategorySet, IdentifierSet, PreservationReport, Score,
    StylesheetAnalysis,
};
pub use merge::{CascadeMerger, ConflictRecord, MergedStylesheet};
pub use parser::{ParseError, ParserConfig, Rule, ScopeKind, SourceId, Stylesheet, ThemeSplit};
pub use utils::{CoreError, Tally};

/// Crate version for runtime compatibility checks.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = core::result::Result<T, CoreError>;
