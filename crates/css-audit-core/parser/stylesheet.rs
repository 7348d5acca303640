//! Parsed stylesheet and parser configuration

use super::{
    errors::{ParseError, ParseIssue},
    rule::{normalize_selector, Rule, ScopeKind, SourceId},
    scanner::{scan_blocks, strip_comments},
    DEFAULT_THEME_ATTRIBUTE,
};

/// Parser limits and scope conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum input size in bytes
    pub max_input_size: usize,
    /// Attribute name that marks theme scopes
    pub theme_attribute: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_size: 50 * 1024 * 1024,
            theme_attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
        }
    }
}

impl ParserConfig {
    /// Set maximum input size in bytes.
    #[must_use]
    pub const fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// Set the theme attribute name.
    #[must_use]
    pub fn with_theme_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.theme_attribute = attribute.into();
        self
    }
}

/// Block counts gathered while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StylesheetStats {
    /// Plain rules kept
    pub plain: usize,
    /// `@media` blocks kept
    pub media: usize,
    /// `@keyframes` blocks kept
    pub keyframes: usize,
    /// Theme attribute rules kept
    pub theme_attribute: usize,
    /// Blocks dropped for an empty selector or body
    pub dropped: usize,
    /// Statement at-rules such as `@import`
    pub statements: usize,
}

impl StylesheetStats {
    /// Rules kept across all kinds.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.plain + self.media + self.keyframes + self.theme_attribute
    }

    fn count(&mut self, kind: ScopeKind) {
        match kind {
            ScopeKind::Plain => self.plain += 1,
            ScopeKind::Media => self.media += 1,
            ScopeKind::Keyframes => self.keyframes += 1,
            ScopeKind::ThemeAttribute => self.theme_attribute += 1,
        }
    }
}

/// Result of one parse pass over one source.
///
/// Always holds every rule closed before a fault. When [`is_partial`] is
/// true, [`fault`] says what cut the parse short.
///
/// [`is_partial`]: Stylesheet::is_partial
/// [`fault`]: Stylesheet::fault
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stylesheet {
    source: SourceId,
    rules: Vec<Rule>,
    issues: Vec<ParseIssue>,
    fault: Option<ParseError>,
    stats: StylesheetStats,
}

impl Stylesheet {
    /// Parse stylesheet text with the default configuration.
    #[must_use]
    pub fn parse(source: SourceId, text: &str) -> Self {
        Self::parse_with_config(source, text, &ParserConfig::default())
    }

    /// Parse stylesheet text.
    #[must_use]
    pub fn parse_with_config(source: SourceId, text: &str, config: &ParserConfig) -> Self {
        Self::parse_at(source, text, 1, config)
    }

    /// Parse the body of a grouping rule such as `@media`.
    ///
    /// Inner rules keep the outer rule's source and get line numbers
    /// relative to the enclosing file.
    #[must_use]
    pub fn parse_nested(rule: &Rule, config: &ParserConfig) -> Self {
        Self::parse_at(rule.source(), rule.body(), rule.body_line(), config)
    }

    fn parse_at(source: SourceId, text: &str, first_line: usize, config: &ParserConfig) -> Self {
        if text.len() > config.max_input_size {
            let fault = ParseError::InputTooLarge {
                size: text.len(),
                limit: config.max_input_size,
            };
            log::warn!("source {source}: {fault}");
            return Self {
                source,
                rules: Vec::new(),
                issues: Vec::new(),
                fault: Some(fault),
                stats: StylesheetStats::default(),
            };
        }

        let mut issues = Vec::new();
        let clean = strip_comments(text, first_line, &mut issues);
        let scan = scan_blocks(&clean, first_line);
        issues.extend(scan.issues);

        let mut stats = StylesheetStats {
            statements: scan.statements,
            ..StylesheetStats::default()
        };
        let mut rules = Vec::with_capacity(scan.blocks.len());

        for block in scan.blocks {
            let selector = normalize_selector(block.selector);
            let body = block.body.trim();
            if selector.is_empty() || body.is_empty() {
                stats.dropped += 1;
                continue;
            }

            let leading = &block.body[..block.body.len() - block.body.trim_start().len()];
            let body_line = block.open_line + leading.matches('\n').count();
            let scope_kind = ScopeKind::infer(&selector, &config.theme_attribute);
            stats.count(scope_kind);

            rules.push(Rule::from_parts(
                selector,
                body.to_string(),
                source,
                rules.len(),
                scope_kind,
                (block.line, body_line),
            ));
        }

        if let Some(fault) = &scan.fault {
            log::warn!(
                "source {source}: {fault}; keeping {} rule(s) closed before it",
                rules.len()
            );
        }
        log::debug!(
            "source {source}: {} rule(s), {} dropped, {} issue(s)",
            rules.len(),
            stats.dropped,
            issues.len()
        );

        Self {
            source,
            rules,
            issues,
            fault: scan.fault,
            stats,
        }
    }

    #[must_use]
    pub const fn source(&self) -> SourceId {
        self.source
    }

    /// Rules in document order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Consume the stylesheet, keeping its rules.
    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Rules of one scope kind in document order.
    pub fn rules_of_kind(&self, kind: ScopeKind) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |rule| rule.scope_kind() == kind)
    }

    /// Recoverable issues encountered while scanning.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Fault that ended the parse early, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&ParseError> {
        self.fault.as_ref()
    }

    /// Whether the rule list stops short of the end of input.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.fault.is_some()
    }

    #[must_use]
    pub const fn stats(&self) -> &StylesheetStats {
        &self.stats
    }
}
