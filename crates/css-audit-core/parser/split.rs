//! Partition of a stylesheet into base rules and per-theme rules
//!
//! A theme rule is any rule whose selector starts with the theme attribute,
//! such as `[data-theme="dark"]` or `[data-theme="dark"] .card`. Everything
//! else, including `:root` and grouping blocks, is base. The partition is
//! lossless: every rule lands in exactly one group.
//!
//! ```rust
//! use css_audit_core::parser::{SourceId, Stylesheet};
//!
//! let sheet = Stylesheet::parse(
//!     SourceId(0),
//!     ".card { padding: 0; }\n[data-theme=\"dark\"] { --bg: #000; }",
//! );
//! let split = sheet.split_themes("data-theme");
//! assert_eq!(split.base().len(), 1);
//! assert_eq!(split.theme_names().collect::<Vec<_>>(), ["dark"]);
//! ```

use super::{rule::theme_name, Rule, Stylesheet};

/// Base rules plus theme rules grouped by theme name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ThemeSplit {
    base: Vec<Rule>,
    /// In order of each theme's first rule
    themes: Vec<(String, Vec<Rule>)>,
}

impl ThemeSplit {
    /// Non-theme rules in document order.
    #[must_use]
    pub fn base(&self) -> &[Rule] {
        &self.base
    }

    /// Theme groups in order of first appearance.
    #[must_use]
    pub fn themes(&self) -> &[(String, Vec<Rule>)] {
        &self.themes
    }

    /// Rules of one theme, if it has any.
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&[Rule]> {
        self.themes
            .iter()
            .find(|(theme, _)| theme == name)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Theme names in order of first appearance.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.themes.iter().map(|(name, _)| name.as_str())
    }

    /// Rules across base and every theme.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.base.len() + self.themes.iter().map(|(_, rules)| rules.len()).sum::<usize>()
    }
}

impl Stylesheet {
    /// Split rules into base and per-theme groups.
    ///
    /// Sequence indexes are renumbered within each group; selectors, bodies,
    /// sources and lines are kept.
    #[must_use]
    pub fn split_themes(&self, theme_attribute: &str) -> ThemeSplit {
        let mut split = ThemeSplit::default();

        for rule in self.rules() {
            let Some(name) = theme_name(rule.selector(), theme_attribute) else {
                let seq = split.base.len();
                split.base.push(rule.rebased(rule.body(), rule.source(), seq));
                continue;
            };

            let group = if let Some(pos) = split.themes.iter().position(|(theme, _)| theme == name) {
                &mut split.themes[pos].1
            } else {
                split.themes.push((name.to_string(), Vec::new()));
                let last = split.themes.len() - 1;
                &mut split.themes[last].1
            };
            let seq = group.len();
            group.push(rule.rebased(rule.body(), rule.source(), seq));
        }

        log::debug!(
            "source {}: {} base rule(s), {} theme(s)",
            self.source(),
            split.base.len(),
            split.themes.len()
        );
        split
    }
}
