//! Stylesheets cut short by a parse fault

use crate::{
    analysis::{
        audit::{AuditIssue, AuditRule, AuditSeverity},
        StylesheetAnalysis,
    },
    parser::ParseError,
};

/// Rule for stylesheets whose rule list stops before the end of input.
pub struct PartialParseRule;

impl AuditRule for PartialParseRule {
    fn id(&self) -> &'static str {
        "partial-parse"
    }

    fn name(&self) -> &'static str {
        "Partial Parse"
    }

    fn description(&self) -> &'static str {
        "Detects stylesheets with unbalanced braces or oversized input"
    }

    fn default_severity(&self) -> AuditSeverity {
        AuditSeverity::Warning
    }

    fn check(&self, analysis: &StylesheetAnalysis) -> Vec<AuditIssue> {
        analysis
            .faults()
            .iter()
            .map(|(source, fault)| {
                let issue = AuditIssue::new(self.default_severity(), self.id(), fault.to_string());
                match fault {
                    ParseError::UnterminatedBlock { line, .. } => issue
                        .with_location(*source, *line)
                        .with_suggestion("Close the block; rules after it were not analyzed"),
                    ParseError::InputTooLarge { .. } => issue.with_location(*source, 1),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::AnalysisConfig,
        parser::{SourceId, Stylesheet},
    };

    #[test]
    fn reports_opening_line() {
        let sheet = Stylesheet::parse(SourceId(1), ".a { b: c; }\n\n.open {\n  d: e;");
        let analysis = StylesheetAnalysis::analyze(&[sheet], &AnalysisConfig::default());
        let issues = PartialParseRule.check(&analysis);
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].source(), issues[0].line()), (Some(SourceId(1)), Some(3)));
    }
}
