//! Plain text and JSON rendering of reports

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use css_audit_core::{
    analysis::{audit::AuditIssue, BindingFinding, BindingReport, VariableDiff},
    MergedStylesheet, PreservationReport, SourceId,
};
use serde::Serialize;

use crate::name_of;

/// Renders reports to stdout.
pub struct Printer {
    json: bool,
    names: Vec<(SourceId, String)>,
}

impl Printer {
    pub fn new(json: bool, names: Vec<(SourceId, String)>) -> Self {
        Self { json, names }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    fn source_name(&self, id: SourceId) -> String {
        name_of(&self.names, id)
    }

    fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn merge_summary(&self, merged: &MergedStylesheet) -> Result<()> {
        if self.json {
            return Self::emit_json(&serde_json::json!({
                "rules": merged.rules().len(),
                "conflicts": merged.conflicts(),
                "warnings": merged.warnings(),
            }));
        }

        let mut out = io::stderr().lock();
        let identical = merged.conflicts().iter().filter(|c| c.identical).count();
        writeln!(
            out,
            "{} rules, {} conflicts ({identical} identical)",
            merged.rules().len(),
            merged.conflicts().len()
        )?;
        for conflict in merged.conflicts() {
            writeln!(
                out,
                "  {}: {} overridden by {}{}",
                conflict.selector,
                self.source_name(conflict.losing_source),
                self.source_name(conflict.winning_source),
                if conflict.identical { " (same definition)" } else { "" }
            )?;
        }
        for warning in merged.warnings() {
            writeln!(out, "  warning: {warning}")?;
        }
        Ok(())
    }

    pub fn split_summary(&self, total: usize, written: &[(PathBuf, usize)]) -> Result<()> {
        if self.json {
            let files: Vec<_> = written
                .iter()
                .map(|(path, rules)| serde_json::json!({ "path": path, "rules": rules }))
                .collect();
            return Self::emit_json(&serde_json::json!({ "rules": total, "files": files }));
        }

        let mut out = io::stdout().lock();
        for (path, rules) in written {
            writeln!(out, "{}: {rules} rule(s)", path.display())?;
        }
        let sum: usize = written.iter().map(|(_, rules)| rules).sum();
        writeln!(out, "{sum} of {total} rule(s) written")?;
        Ok(())
    }

    pub fn variables(&self, diff: &VariableDiff) -> Result<()> {
        if self.json {
            return Self::emit_json(diff);
        }

        let mut out = io::stdout().lock();
        for scope in diff.scopes() {
            if scope.scope_absent {
                writeln!(out, "{}: scope missing", scope.scope)?;
            } else {
                writeln!(out, "{}: {}", scope.scope, scope.score())?;
            }
            for name in &scope.missing {
                writeln!(out, "  - {name}")?;
            }
            for name in &scope.extra {
                writeln!(out, "  + {name}")?;
            }
            for changed in &scope.changed {
                writeln!(
                    out,
                    "  ~ {}: {} -> {}",
                    changed.name, changed.reference, changed.current
                )?;
            }
        }
        for scope in diff.unmatched_current_scopes() {
            writeln!(out, "{scope}: new scope")?;
        }
        if diff.is_clean() {
            writeln!(out, "no variable differences")?;
        }
        Ok(())
    }

    pub fn bindings(&self, report: &BindingReport) -> Result<()> {
        if self.json {
            return Self::emit_json(report);
        }

        let mut out = io::stdout().lock();
        writeln!(out, "matched: {}", report.matched().join(", "))?;
        for reference in report.references() {
            if report.missing().contains(&reference.name) {
                writeln!(
                    out,
                    "{}:{}: animation '{}' has no @keyframes",
                    self.source_name(reference.source),
                    reference.line,
                    reference.name
                )?;
            }
        }
        for finding in report.findings() {
            if matches!(finding, BindingFinding::UnusedKeyframe(_)) {
                writeln!(out, "{finding}")?;
            }
        }
        Ok(())
    }

    pub fn preservation(&self, report: &PreservationReport) -> Result<()> {
        if self.json {
            return Self::emit_json(report);
        }

        let mut out = io::stdout().lock();
        for category in report.categories() {
            writeln!(
                out,
                "{:<14} {:>6}  preserved {}, missing {}, extra {}",
                category.category.as_str(),
                category.score.to_string(),
                category.preserved.len(),
                category.missing.len(),
                category.extra.len()
            )?;
            for missing in &category.missing {
                writeln!(out, "  - {} (x{})", missing.name, missing.count)?;
            }
            for changed in category.count_changes() {
                writeln!(
                    out,
                    "  ~ {} (x{} -> x{})",
                    changed.name, changed.reference_count, changed.current_count
                )?;
            }
        }
        writeln!(out, "aggregate: {} ({})", report.aggregate(), report.grade())?;
        if report.is_advisory() {
            writeln!(out, "note: script identifiers are heuristic")?;
        }
        Ok(())
    }

    pub fn issues(&self, issues: &[AuditIssue]) -> Result<()> {
        if self.json {
            return Self::emit_json(issues);
        }

        let mut out = io::stdout().lock();
        for issue in issues {
            match (issue.source(), issue.line()) {
                (Some(source), Some(line)) => write!(out, "{}:{line}: ", self.source_name(source))?,
                (Some(source), None) => write!(out, "{}: ", self.source_name(source))?,
                _ => {}
            }
            writeln!(
                out,
                "{} [{}] {}",
                issue.severity(),
                issue.rule_id(),
                issue.message()
            )?;
            if let Some(suggestion) = issue.suggestion() {
                writeln!(out, "  help: {suggestion}")?;
            }
        }
        writeln!(out, "{} issue(s)", issues.len())?;
        Ok(())
    }
}
