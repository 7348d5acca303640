//! Merge overrides that emptied a rule

use crate::{
    analysis::{
        audit::{AuditIssue, AuditRule, AuditSeverity},
        StylesheetAnalysis,
    },
    merge::MergeWarning,
};

/// Rule for cascade merges that replaced content with an empty body.
///
/// Only reports when merge results were attached with
/// [`StylesheetAnalysis::with_merge`].
pub struct ValuelessOverrideRule;

impl AuditRule for ValuelessOverrideRule {
    fn id(&self) -> &'static str {
        "valueless-override"
    }

    fn name(&self) -> &'static str {
        "Valueless Override"
    }

    fn description(&self) -> &'static str {
        "Detects merged rules whose winning definition has an empty body"
    }

    fn default_severity(&self) -> AuditSeverity {
        AuditSeverity::Warning
    }

    fn check(&self, analysis: &StylesheetAnalysis) -> Vec<AuditIssue> {
        analysis
            .merge_warnings()
            .iter()
            .map(|warning| match warning {
                MergeWarning::ValuelessOverride {
                    selector, source, ..
                } => AuditIssue::new(self.default_severity(), self.id(), warning.to_string())
                    .with_suggestion(format!(
                        "Remove the empty '{selector}' rule from {source} or give it declarations"
                    )),
            })
            .collect()
    }
}
