//! `@keyframes` nothing references

use crate::analysis::{
    audit::{AuditIssue, AuditRule, AuditSeverity},
    Category, StylesheetAnalysis,
};

/// Rule for keyframes that no animation declaration uses.
pub struct UnusedKeyframeRule;

impl AuditRule for UnusedKeyframeRule {
    fn id(&self) -> &'static str {
        "unused-keyframe"
    }

    fn name(&self) -> &'static str {
        "Unused Keyframe"
    }

    fn description(&self) -> &'static str {
        "Detects @keyframes blocks never referenced by an animation declaration"
    }

    fn default_severity(&self) -> AuditSeverity {
        AuditSeverity::Info
    }

    fn check(&self, analysis: &StylesheetAnalysis) -> Vec<AuditIssue> {
        analysis
            .bindings()
            .unused()
            .iter()
            .map(|name| {
                let issue = AuditIssue::new(
                    self.default_severity(),
                    self.id(),
                    format!("@keyframes '{name}' is never used"),
                );
                match analysis
                    .identifiers()
                    .occurrences(Category::Keyframe, name)
                    .next()
                {
                    Some(definition) => issue.with_location(definition.source, definition.line),
                    None => issue,
                }
            })
            .collect()
    }
}
