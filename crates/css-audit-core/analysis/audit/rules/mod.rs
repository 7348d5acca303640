//! Built-in audit rules
//!
//! Each rule lives in its own module and reads one part of a
//! [`StylesheetAnalysis`](crate::analysis::StylesheetAnalysis).
//!
//! # Example
//!
//! ```rust
//! use css_audit_core::analysis::{audit::{AuditRule, BuiltinRules}, AnalysisConfig, StylesheetAnalysis};
//! use css_audit_core::{SourceId, Stylesheet};
//!
//! let sheet = Stylesheet::parse(SourceId(0), ".a { animation: missing 1s; }");
//! let analysis = StylesheetAnalysis::analyze(&[sheet], &AnalysisConfig::default());
//!
//! for rule in BuiltinRules::all_rules() {
//!     for issue in rule.check(&analysis) {
//!         println!("{}: {}", rule.name(), issue.message());
//!     }
//! }
//! ```

use super::AuditRule;

pub mod duplicate_selector;
pub mod missing_keyframe;
pub mod partial_parse;
pub mod unused_keyframe;
pub mod valueless_override;

pub use duplicate_selector::DuplicateSelectorRule;
pub use missing_keyframe::MissingKeyframeRule;
pub use partial_parse::PartialParseRule;
pub use unused_keyframe::UnusedKeyframeRule;
pub use valueless_override::ValuelessOverrideRule;

/// Built-in audit rules registry.
pub struct BuiltinRules;

impl BuiltinRules {
    /// All built-in rules in reporting order.
    #[must_use]
    pub fn all_rules() -> Vec<Box<dyn AuditRule>> {
        vec![
            Box::new(MissingKeyframeRule),
            Box::new(UnusedKeyframeRule),
            Box::new(PartialParseRule),
            Box::new(DuplicateSelectorRule),
            Box::new(ValuelessOverrideRule),
        ]
    }

    /// Look up a built-in rule by id.
    #[must_use]
    pub fn rule(id: &str) -> Option<Box<dyn AuditRule>> {
        Self::all_rules().into_iter().find(|rule| rule.id() == id)
    }

    /// Ids of every built-in rule.
    #[must_use]
    pub fn rule_ids() -> Vec<&'static str> {
        Self::all_rules().iter().map(|rule| rule.id()).collect()
    }
}
