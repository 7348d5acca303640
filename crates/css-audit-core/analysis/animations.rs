//! Animation and keyframe binding checks
//!
//! Every `animation` / `animation-name` declaration references at most one
//! name: the first token that is neither a duration, a number nor a reserved
//! timing/fill keyword. Those names are cross-checked against `@keyframes`
//! definitions in the same analysis scope.
//!
//! Both kinds of finding are non-fatal and always reported in full; whether
//! they fail a build is up to the caller.

use core::fmt;

use super::identifiers::{Category, IdentifierSet, Provenance};
use crate::parser::Declaration;

/// Keywords that never name an animation.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "linear",
    "step-start",
    "step-end",
    "infinite",
    "alternate",
    "alternate-reverse",
    "reverse",
    "normal",
    "forwards",
    "backwards",
    "both",
    "none",
    "running",
    "paused",
    "initial",
    "inherit",
    "unset",
];

/// Picks the referenced animation name out of a declaration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationNameRule {
    extra_reserved: Vec<String>,
}

impl Default for AnimationNameRule {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl AnimationNameRule {
    /// Rule with additional reserved keywords on top of [`RESERVED_KEYWORDS`].
    #[must_use]
    pub fn new(extra_reserved: &[String]) -> Self {
        Self {
            extra_reserved: extra_reserved
                .iter()
                .map(|keyword| keyword.to_ascii_lowercase())
                .collect(),
        }
    }

    /// `animation` or `animation-name`, with or without a vendor prefix.
    #[must_use]
    pub fn is_animation_property(&self, declaration: &Declaration<'_>) -> bool {
        matches!(
            declaration.unprefixed_property().as_str(),
            "animation" | "animation-name"
        )
    }

    /// Whether `token` is reserved, ignoring case.
    #[must_use]
    pub fn is_reserved(&self, token: &str) -> bool {
        let lower = token.to_ascii_lowercase();
        RESERVED_KEYWORDS.contains(&lower.as_str()) || self.extra_reserved.contains(&lower)
    }

    /// First token of `value` that names an animation.
    ///
    /// Function tokens such as `cubic-bezier(0.1, 0.7, 1, 0.1)` are skipped
    /// with all their arguments. A trailing comma and surrounding quotes are
    /// removed from the chosen token.
    #[must_use]
    pub fn referenced_name<'v>(&self, value: &'v str) -> Option<&'v str> {
        let mut depth = 0usize;
        for token in value.split_whitespace() {
            let opens = token.matches('(').count();
            let closes = token.matches(')').count();
            if depth > 0 || opens > 0 {
                depth = (depth + opens).saturating_sub(closes);
                continue;
            }

            let token = token.trim_end_matches(',');
            let token = token
                .strip_prefix(['"', '\''])
                .and_then(|inner| inner.strip_suffix(['"', '\'']))
                .unwrap_or(token);
            if token.is_empty() || is_numeric(token) || self.is_reserved(token) {
                continue;
            }
            return Some(token);
        }
        None
    }
}

/// Duration (`2s`, `150ms`) or bare number (`3`, `.5`).
fn is_numeric(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    let number = lower
        .strip_suffix("ms")
        .or_else(|| lower.strip_suffix('s'))
        .unwrap_or(lower.as_str());
    let number = number.strip_prefix(['+', '-']).unwrap_or(number);

    let mut digits = 0;
    let mut dots = 0;
    for byte in number.bytes() {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// One binding problem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BindingFinding {
    /// Referenced name with no matching `@keyframes`
    MissingKeyframe(String),
    /// `@keyframes` never referenced
    UnusedKeyframe(String),
}

impl fmt::Display for BindingFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeyframe(name) => write!(f, "animation '{name}' has no @keyframes"),
            Self::UnusedKeyframe(name) => write!(f, "@keyframes '{name}' is never used"),
        }
    }
}

/// Complete cross-reference of animation names and keyframes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BindingReport {
    matched: Vec<String>,
    missing: Vec<String>,
    unused: Vec<String>,
    references: Vec<Provenance>,
}

impl BindingReport {
    /// Cross-check the animation references and keyframes of one set.
    #[must_use]
    pub fn from_identifiers(set: &IdentifierSet) -> Self {
        let keyframes = set.tally(Category::Keyframe);
        let refs = set.tally(Category::AnimationRef);

        let mut matched: Vec<String> = refs
            .names()
            .filter(|name| keyframes.contains(name))
            .map(str::to_string)
            .collect();
        let mut missing: Vec<String> = refs
            .names()
            .filter(|name| !keyframes.contains(name))
            .map(str::to_string)
            .collect();
        let mut unused: Vec<String> = keyframes
            .names()
            .filter(|name| !refs.contains(name))
            .map(str::to_string)
            .collect();
        matched.sort();
        missing.sort();
        unused.sort();

        let references = set
            .provenance()
            .iter()
            .filter(|p| p.category == Category::AnimationRef)
            .cloned()
            .collect();

        if !missing.is_empty() {
            log::debug!("{} animation name(s) without @keyframes", missing.len());
        }

        Self {
            matched,
            missing,
            unused,
            references,
        }
    }

    /// Names referenced and defined, sorted.
    #[must_use]
    pub fn matched(&self) -> &[String] {
        &self.matched
    }

    /// Names referenced but never defined, sorted.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Keyframes defined but never referenced, sorted.
    #[must_use]
    pub fn unused(&self) -> &[String] {
        &self.unused
    }

    /// Every reference with its location.
    #[must_use]
    pub fn references(&self) -> &[Provenance] {
        &self.references
    }

    /// Missing keyframes first, then unused ones.
    #[must_use]
    pub fn findings(&self) -> Vec<BindingFinding> {
        self.missing
            .iter()
            .cloned()
            .map(BindingFinding::MissingKeyframe)
            .chain(self.unused.iter().cloned().map(BindingFinding::UnusedKeyframe))
            .collect()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::identifiers::extract_stylesheet,
        parser::{ParserConfig, SourceId, Stylesheet},
    };

    fn report(text: &str) -> BindingReport {
        let sheet = Stylesheet::parse(SourceId(0), text);
        let set = extract_stylesheet(&sheet, &ParserConfig::default(), &AnimationNameRule::default());
        BindingReport::from_identifiers(&set)
    }

    #[test]
    fn first_unreserved_token_wins() {
        let rule = AnimationNameRule::default();
        assert_eq!(rule.referenced_name("spin 2s linear infinite"), Some("spin"));
        assert_eq!(rule.referenced_name("2s ease-in 150ms 3 bounce"), Some("bounce"));
        assert_eq!(
            rule.referenced_name("1s cubic-bezier(0.1, 0.7, 1.0, 0.1) slide"),
            Some("slide")
        );
        assert_eq!(rule.referenced_name("steps(4, end) 1s tick"), Some("tick"));
        assert_eq!(rule.referenced_name("fade 1s, slide 2s"), Some("fade"));
        assert_eq!(rule.referenced_name("pulse, glow"), Some("pulse"));
        assert_eq!(rule.referenced_name("\"quoted\" 1s"), Some("quoted"));
        assert_eq!(rule.referenced_name("none"), None);
        assert_eq!(rule.referenced_name("1s INFINITE Alternate"), None);
        assert_eq!(rule.referenced_name("var(--anim) 2s"), None);
    }

    #[test]
    fn extra_reserved_keywords() {
        let rule = AnimationNameRule::new(&["Revert".to_string()]);
        assert_eq!(rule.referenced_name("revert 1s spin"), Some("spin"));
    }

    #[test]
    fn numeric_tokens() {
        assert!(is_numeric("2s"));
        assert!(is_numeric("150MS"));
        assert!(is_numeric(".5s"));
        assert!(is_numeric("3"));
        assert!(is_numeric("-1s"));
        assert!(!is_numeric("s"));
        assert!(!is_numeric("1.2.3s"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("spin"));
    }

    #[test]
    fn matched_binding() {
        let report = report(
            ".loader { animation: spin 2s linear infinite; }\n@keyframes spin { to { transform: rotate(360deg); } }",
        );
        assert_eq!(report.matched(), ["spin".to_string()]);
        assert!(report.is_clean());
    }

    #[test]
    fn missing_and_unused_keyframes() {
        let report = report(
            ".ghost { animation: ghost 1s; }\n@keyframes unused { from { opacity: 0; } }",
        );
        assert_eq!(
            report.findings(),
            vec![
                BindingFinding::MissingKeyframe("ghost".to_string()),
                BindingFinding::UnusedKeyframe("unused".to_string()),
            ]
        );
        assert_eq!(report.references().len(), 1);
        assert_eq!(report.references()[0].line, 1);
    }

    #[test]
    fn vendor_prefixed_declarations_count() {
        let report = report(
            ".a { -webkit-animation: pop .3s both; }\n@-webkit-keyframes pop { to { opacity: 1; } }",
        );
        assert_eq!(report.matched(), ["pop".to_string()]);
    }
}
