//! Animation references without a matching `@keyframes`

use crate::analysis::{
    audit::{AuditIssue, AuditRule, AuditSeverity},
    StylesheetAnalysis,
};

/// Rule for animation names that no `@keyframes` defines.
///
/// One issue per referencing declaration, so every use site is located.
pub struct MissingKeyframeRule;

impl AuditRule for MissingKeyframeRule {
    fn id(&self) -> &'static str {
        "missing-keyframe"
    }

    fn name(&self) -> &'static str {
        "Missing Keyframe"
    }

    fn description(&self) -> &'static str {
        "Detects animations that reference keyframes not defined in the analyzed stylesheets"
    }

    fn default_severity(&self) -> AuditSeverity {
        AuditSeverity::Error
    }

    fn check(&self, analysis: &StylesheetAnalysis) -> Vec<AuditIssue> {
        let bindings = analysis.bindings();
        bindings
            .references()
            .iter()
            .filter(|reference| bindings.missing().contains(&reference.name))
            .map(|reference| {
                AuditIssue::new(
                    self.default_severity(),
                    self.id(),
                    format!("Animation '{}' has no @keyframes definition", reference.name),
                )
                .with_location(reference.source, reference.line)
                .with_suggestion(format!("Define @keyframes {} or fix the name", reference.name))
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
    fn one_issue_per_use_site() {
        let sheet = Stylesheet::parse(
            SourceId(3),
            ".a { animation: ghost 1s; }\n.b {\n  animation-name: ghost;\n}",
        );
        let analysis = StylesheetAnalysis::analyze(&[sheet], &AnalysisConfig::default());
        let issues = MissingKeyframeRule.check(&analysis);

        let locations: Vec<_> = issues.iter().map(|i| (i.source(), i.line())).collect();
        assert_eq!(
            locations,
            vec![(Some(SourceId(3)), Some(1)), (Some(SourceId(3)), Some(3))]
        );
        assert!(issues.iter().all(|i| i.severity() == AuditSeverity::Error));
    }
}
