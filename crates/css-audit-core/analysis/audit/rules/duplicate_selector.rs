//! Selectors repeated within one stylesheet

use crate::analysis::{
    audit::{AuditIssue, AuditRule, AuditSeverity},
    StylesheetAnalysis,
};

/// Rule for selectors defined more than once in the same stylesheet.
///
/// Repeats are legal and the merger resolves them in place, but they usually
/// mean a stylesheet was concatenated twice or edited in two places.
pub struct DuplicateSelectorRule;

impl AuditRule for DuplicateSelectorRule {
    fn id(&self) -> &'static str {
        "duplicate-selector"
    }

    fn name(&self) -> &'static str {
        "Duplicate Selector"
    }

    fn description(&self) -> &'static str {
        "Detects selectors defined more than once within one stylesheet"
    }

    fn default_severity(&self) -> AuditSeverity {
        AuditSeverity::Hint
    }

    fn check(&self, analysis: &StylesheetAnalysis) -> Vec<AuditIssue> {
        analysis
            .duplicates()
            .iter()
            .map(|duplicate| {
                let lines: Vec<String> = duplicate.lines.iter().map(ToString::to_string).collect();
                AuditIssue::new(
                    self.default_severity(),
                    self.id(),
                    format!(
                        "'{}' defined {} times (lines {})",
                        duplicate.selector,
                        duplicate.lines.len(),
                        lines.join(", ")
                    ),
                )
                .with_location(duplicate.source, duplicate.lines.last().copied().unwrap_or(1))
                .with_suggestion("Fold the declarations into one rule")
            })
            .collect()
    }
}
