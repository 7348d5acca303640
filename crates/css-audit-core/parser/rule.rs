//! Rule and scope classification
//!
//! A [`Rule`] is the unit every other component works with: one selector and
//! the verbatim text between its braces. Rules are immutable once built.

use core::fmt;

use super::DEFAULT_THEME_ATTRIBUTE;

/// Identifies the input a rule came from.
///
/// The core never sees file names; callers keep their own id → name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceId(pub u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of block, inferred from the selector prefix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ScopeKind {
    /// Ordinary selector, `:root`, and at-rules without special handling
    Plain,
    /// `@media` grouping block
    Media,
    /// `@keyframes` (or a vendor-prefixed form)
    Keyframes,
    /// Selector starting with the theme attribute, e.g. `[data-theme="dark"]`
    ThemeAttribute,
}

impl ScopeKind {
    /// Classify a normalized selector.
    ///
    /// `theme_attribute` is the attribute name that marks theme scopes,
    /// normally `data-theme`.
    #[must_use]
    pub fn infer(selector: &str, theme_attribute: &str) -> Self {
        if let Some(at_rule) = selector.strip_prefix('@') {
            let keyword = at_rule
                .split(|c: char| c.is_whitespace() || c == '(')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            return if keyword == "media" {
                Self::Media
            } else if is_keyframes_keyword(&keyword) {
                Self::Keyframes
            } else {
                Self::Plain
            };
        }

        let is_theme = selector
            .strip_prefix('[')
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix(theme_attribute))
            .is_some_and(|rest| rest.trim_start().starts_with('='));

        if is_theme {
            Self::ThemeAttribute
        } else {
            Self::Plain
        }
    }
}

/// `keyframes`, `-webkit-keyframes`, `-moz-keyframes`, ...
fn is_keyframes_keyword(keyword: &str) -> bool {
    keyword == "keyframes"
        || keyword
            .strip_prefix('-')
            .and_then(|rest| rest.split_once('-'))
            .is_some_and(|(vendor, name)| !vendor.is_empty() && name == "keyframes")
}

/// Theme named by a selector's leading attribute, e.g. `dark` for
/// `[data-theme="dark"] .card`.
///
/// Quotes around the value are optional. Returns `None` when the selector does
/// not start with `[theme_attribute=` or the value is empty.
#[must_use]
pub fn theme_name<'s>(selector: &'s str, theme_attribute: &str) -> Option<&'s str> {
    let rest = selector.trim_start().strip_prefix('[')?.trim_start();
    let rest = rest.strip_prefix(theme_attribute)?.trim_start();
    let rest = rest.strip_prefix('=')?;
    let (value, _) = rest.split_once(']')?;
    let value = value.trim();
    let name = ['"', '\'']
        .iter()
        .find_map(|&q| value.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(value)
        .trim();
    (!name.is_empty()).then_some(name)
}

/// Render rules as stylesheet text, one blank line between rules.
#[must_use]
pub fn to_css(rules: &[Rule]) -> String {
    let mut out = String::new();
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&rule.to_string());
        out.push('\n');
    }
    out
}

/// Collapse whitespace runs to a single space and trim.
#[must_use]
pub fn normalize_selector(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    for part in selector.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

/// One top-level block of a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    selector: String,
    body: String,
    source: SourceId,
    sequence_index: usize,
    scope_kind: ScopeKind,
    line: usize,
    body_line: usize,
}

impl Rule {
    /// Build a rule from raw selector and body text.
    ///
    /// The selector is normalized, the body trimmed and the scope kind
    /// inferred with the default theme attribute. Line information defaults
    /// to line 1.
    #[must_use]
    pub fn new(selector: &str, body: &str, source: SourceId, sequence_index: usize) -> Self {
        let selector = normalize_selector(selector);
        let scope_kind = ScopeKind::infer(&selector, DEFAULT_THEME_ATTRIBUTE);
        Self {
            selector,
            body: body.trim().to_string(),
            source,
            sequence_index,
            scope_kind,
            line: 1,
            body_line: 1,
        }
    }

    pub(crate) const fn from_parts(
        selector: String,
        body: String,
        source: SourceId,
        sequence_index: usize,
        scope_kind: ScopeKind,
        lines: (usize, usize),
    ) -> Self {
        Self {
            selector,
            body,
            source,
            sequence_index,
            scope_kind,
            line: lines.0,
            body_line: lines.1,
        }
    }

    /// Copy of this rule with another body, source and position.
    ///
    /// Used by the merger; selector, scope kind and lines are kept.
    #[must_use]
    pub(crate) fn rebased(&self, body: &str, source: SourceId, sequence_index: usize) -> Self {
        Self {
            selector: self.selector.clone(),
            body: body.to_string(),
            source,
            sequence_index,
            scope_kind: self.scope_kind,
            line: self.line,
            body_line: self.body_line,
        }
    }

    /// Normalized selector or at-rule prelude.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Trimmed, verbatim block contents.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub const fn source(&self) -> SourceId {
        self.source
    }

    /// Position of the rule within its list.
    #[must_use]
    pub const fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    #[must_use]
    pub const fn scope_kind(&self) -> ScopeKind {
        self.scope_kind
    }

    /// Line of the selector (1-based).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Line where the body text starts (1-based).
    #[must_use]
    pub const fn body_line(&self) -> usize {
        self.body_line
    }

    /// Name declared by a `@keyframes` rule.
    ///
    /// Quoted names (`@keyframes "spin"`) are unquoted. Returns `None` for
    /// any other kind of rule.
    #[must_use]
    pub fn keyframes_name(&self) -> Option<&str> {
        if self.scope_kind != ScopeKind::Keyframes {
            return None;
        }
        let mut parts = self.selector.splitn(2, ' ');
        parts.next()?;
        let name = parts.next()?.trim();
        let name = name
            .strip_prefix(['"', '\''])
            .and_then(|inner| inner.strip_suffix(['"', '\'']))
            .unwrap_or(name);
        (!name.is_empty()).then_some(name)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for line in self.body.lines() {
            let line = line.trim();
            if !line.is_empty() {
                writeln!(f, "    {line}")?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_from_leading_attribute() {
        assert_eq!(theme_name("[data-theme=\"dark\"]", "data-theme"), Some("dark"));
        assert_eq!(theme_name("[data-theme='neon'] .btn", "data-theme"), Some("neon"));
        assert_eq!(theme_name("[ data-theme = matrix ]", "data-theme"), Some("matrix"));
        assert_eq!(theme_name("[data-theme]", "data-theme"), None);
        assert_eq!(theme_name("[data-theme=\"\"]", "data-theme"), None);
        assert_eq!(theme_name(".a [data-theme=dark]", "data-theme"), None);
        assert_eq!(theme_name("[data-mode=dark]", "data-theme"), None);
    }

    #[test]
    fn scope_kind_from_prefix() {
        let infer = |s: &str| ScopeKind::infer(s, "data-theme");
        assert_eq!(infer(".card"), ScopeKind::Plain);
        assert_eq!(infer(":root"), ScopeKind::Plain);
        assert_eq!(infer("@media (max-width: 600px)"), ScopeKind::Media);
        assert_eq!(infer("@MEDIA screen"), ScopeKind::Media);
        assert_eq!(infer("@keyframes spin"), ScopeKind::Keyframes);
        assert_eq!(infer("@-webkit-keyframes spin"), ScopeKind::Keyframes);
        assert_eq!(infer("@supports (display: grid)"), ScopeKind::Plain);
        assert_eq!(infer("@font-face"), ScopeKind::Plain);
        assert_eq!(infer("[data-theme=\"dark\"]"), ScopeKind::ThemeAttribute);
        assert_eq!(infer("[ data-theme = 'dark' ] .btn"), ScopeKind::ThemeAttribute);
        assert_eq!(infer("[data-themes=\"x\"]"), ScopeKind::Plain);
        assert_eq!(infer("[data-theme]"), ScopeKind::Plain);
    }

    #[test]
    fn custom_theme_attribute() {
        assert_eq!(
            ScopeKind::infer("[data-mode=\"dark\"]", "data-mode"),
            ScopeKind::ThemeAttribute
        );
        assert_eq!(
            ScopeKind::infer("[data-theme=\"dark\"]", "data-mode"),
            ScopeKind::Plain
        );
    }

    #[test]
    fn selector_normalization() {
        assert_eq!(normalize_selector("  .a \n\t  > .b  "), ".a > .b");
        assert_eq!(normalize_selector(""), "");
        let rule = Rule::new(".a,\n.b", "  color: red;  ", SourceId(3), 7);
        assert_eq!(rule.selector(), ".a, .b");
        assert_eq!(rule.body(), "color: red;");
        assert_eq!(rule.source(), SourceId(3));
        assert_eq!(rule.sequence_index(), 7);
    }

    #[test]
    fn keyframes_names() {
        let rule = Rule::new("@keyframes spin", "from {} to {}", SourceId(0), 0);
        assert_eq!(rule.keyframes_name(), Some("spin"));
        let rule = Rule::new("@-webkit-keyframes 'fade'", "to {}", SourceId(0), 0);
        assert_eq!(rule.keyframes_name(), Some("fade"));
        let rule = Rule::new(".spin", "a: b;", SourceId(0), 0);
        assert_eq!(rule.keyframes_name(), None);
    }

    #[test]
    fn display_indents_body_lines() {
        let rule = Rule::new(".a", "color: red;\n  margin: 0;", SourceId(0), 0);
        assert_eq!(rule.to_string(), ".a {\n    color: red;\n    margin: 0;\n}");
    }
}
