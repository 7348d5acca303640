//! Audit rules over stylesheet analysis results
//!
//! Turns analysis findings into severity-tagged [`AuditIssue`]s through a
//! trait-based rule registry. Rules never fail; an analysis with problems
//! simply yields more issues. Whether any issue fails a build is the
//! caller's decision.
//!
//! # Built-in Rules
//!
//! - `missing-keyframe`: animation references an undefined keyframe
//! - `unused-keyframe`: keyframe defined but never referenced
//! - `partial-parse`: stylesheet ended with an unterminated block
//! - `duplicate-selector`: selector defined twice in one stylesheet
//! - `valueless-override`: merge replaced a rule with an empty body

use core::fmt;

use super::StylesheetAnalysis;
use crate::parser::SourceId;

pub mod rules;

pub use rules::BuiltinRules;

/// Severity level for audit issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AuditSeverity {
    /// Informational message - no action required
    Info,
    /// Hint for improvement - optional fix
    Hint,
    /// Warning - should be addressed but not critical
    Warning,
    /// Error - styling is broken somewhere
    Error,
}

impl fmt::Display for AuditSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl core::str::FromStr for AuditSeverity {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "hint" => Ok(Self::Hint),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(crate::CoreError::config(format!(
                "unknown severity '{other}'"
            ))),
        }
    }
}

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuditIssue {
    severity: AuditSeverity,
    rule_id: &'static str,
    message: String,
    source: Option<SourceId>,
    line: Option<usize>,
    suggestion: Option<String>,
}

impl AuditIssue {
    /// Create a new audit issue.
    #[must_use]
    pub const fn new(severity: AuditSeverity, rule_id: &'static str, message: String) -> Self {
        Self {
            severity,
            rule_id,
            message,
            source: None,
            line: None,
            suggestion: None,
        }
    }

    /// Add source location.
    #[must_use]
    pub const fn with_location(mut self, source: SourceId, line: usize) -> Self {
        self.source = Some(source);
        self.line = Some(line);
        self
    }

    /// Add a suggested fix.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub const fn severity(&self) -> AuditSeverity {
        self.severity
    }

    /// Id of the rule that produced this issue.
    #[must_use]
    pub const fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn source(&self) -> Option<SourceId> {
        self.source
    }

    /// 1-based line, when the finding has one location.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

impl fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.rule_id)?;
        if let (Some(source), Some(line)) = (self.source, self.line) {
            write!(f, " {source}:{line}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Configuration for audit behavior.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Minimum severity level to report
    pub min_severity: AuditSeverity,
    /// Maximum number of issues to report (0 = unlimited)
    pub max_issues: usize,
    /// Enabled rule IDs (empty = all enabled)
    pub enabled_rules: Vec<String>,
    /// Disabled rule IDs
    pub disabled_rules: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_severity: AuditSeverity::Info,
            max_issues: 0,
            enabled_rules: Vec::new(),
            disabled_rules: Vec::new(),
        }
    }
}

impl AuditConfig {
    /// Set minimum severity level.
    #[must_use]
    pub const fn with_min_severity(mut self, severity: AuditSeverity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Set maximum number of issues.
    #[must_use]
    pub const fn with_max_issues(mut self, max: usize) -> Self {
        self.max_issues = max;
        self
    }

    /// Only run the listed rules (may be called repeatedly).
    #[must_use]
    pub fn enable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.enabled_rules.push(rule_id.into());
        self
    }

    #[must_use]
    pub fn disable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.push(rule_id.into());
        self
    }

    /// Check if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.disabled_rules.iter().any(|id| id == rule_id) {
            return false;
        }
        self.enabled_rules.is_empty() || self.enabled_rules.iter().any(|id| id == rule_id)
    }

    /// Check if severity should be reported.
    #[must_use]
    pub fn should_report_severity(&self, severity: AuditSeverity) -> bool {
        severity >= self.min_severity
    }
}

/// Trait for implementing audit rules.
pub trait AuditRule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Rule description.
    fn description(&self) -> &'static str;

    /// Default severity level.
    fn default_severity(&self) -> AuditSeverity;

    /// Check analysis results and return issues.
    fn check(&self, analysis: &StylesheetAnalysis) -> Vec<AuditIssue>;
}

/// Audit analysis results with the given configuration.
///
/// Runs all enabled built-in rules in registry order, respecting the
/// severity filter and issue limit.
#[must_use]
pub fn audit(analysis: &StylesheetAnalysis, config: &AuditConfig) -> Vec<AuditIssue> {
    let mut issues = Vec::new();

    for rule in BuiltinRules::all_rules() {
        if !config.is_rule_enabled(rule.id()) {
            continue;
        }

        let mut rule_issues = rule.check(analysis);
        rule_issues.retain(|issue| config.should_report_severity(issue.severity()));
        issues.extend(rule_issues);

        if config.max_issues > 0 && issues.len() >= config.max_issues {
            issues.truncate(config.max_issues);
            break;
        }
    }

    log::debug!("audit produced {} issue(s)", issues.len());
    issues
}
