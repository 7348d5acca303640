//! Heuristic identifier references from script text
//!
//! Script sources are never parsed. A fixed catalog of regular expressions is
//! matched against the raw text and the captured names are recorded. This is
//! a best-effort approximation: dynamic names are invisible and matches in
//! comments or dead code still count. Sets produced here are marked
//! [`Origin::Script`] and must be treated as advisory.
//!
//! Captured tokens containing template interpolation (`${`) or characters
//! outside `[A-Za-z0-9_-]` are discarded.

use regex::Regex;

use super::{selector_identifiers, Category, IdentifierSet, Origin};
use crate::{parser::SourceId, utils::line_at, CoreError, Result};

/// What a pattern's captures mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    /// Whitespace-separated class list in group 1
    ClassList,
    /// Quoted arguments in group 1, each a class
    QuotedClasses,
    /// Selector string in group 1
    Selector,
    /// Single id in group 1
    Id,
    /// `class` or `id` in group 1, value in group 2
    Attribute,
    /// Custom property name in group 1
    Variable,
}

/// Catalog entries: id, pattern, capture meaning.
const CATALOG: &[(&str, &str, Capture)] = &[
    (
        "class-name-assign",
        r#"\.className\s*=\s*["'`]([^"'`]*)["'`]"#,
        Capture::ClassList,
    ),
    (
        "class-list-call",
        r"\.classList\s*\.\s*(?:add|remove|toggle|contains|replace)\s*\(([^)]*)\)",
        Capture::QuotedClasses,
    ),
    (
        "query-selector",
        r#"\b(?:querySelectorAll|querySelector|closest|matches)\s*\(\s*["'`]([^"'`]*)["'`]"#,
        Capture::Selector,
    ),
    (
        "element-by-id",
        r#"\bgetElementById\s*\(\s*["'`]([^"'`]*)["'`]"#,
        Capture::Id,
    ),
    (
        "elements-by-class",
        r#"\bgetElementsByClassName\s*\(\s*["'`]([^"'`]*)["'`]"#,
        Capture::ClassList,
    ),
    (
        "set-attribute",
        r#"\bsetAttribute\s*\(\s*["'](class|id)["']\s*,\s*["'`]([^"'`]*)["'`]"#,
        Capture::Attribute,
    ),
    (
        "id-assign",
        r#"\.id\s*=\s*["'`]([^"'`]*)["'`]"#,
        Capture::Id,
    ),
    (
        "markup-class",
        r#"\sclass=\\?["']([^"'\\]*)\\?["']"#,
        Capture::ClassList,
    ),
    (
        "markup-id",
        r#"\sid=\\?["']([^"'\\]*)\\?["']"#,
        Capture::Id,
    ),
    (
        "property-call",
        r#"\b(?:setProperty|getPropertyValue|removeProperty)\s*\(\s*["'`](--[A-Za-z0-9_-]+)["'`]"#,
        Capture::Variable,
    ),
    (
        "var-reference",
        r"var\(\s*(--[A-Za-z0-9_-]+)",
        Capture::Variable,
    ),
];

#[derive(Debug, Clone)]
struct ScriptPattern {
    id: &'static str,
    regex: Regex,
    capture: Capture,
}

/// Compiled script pattern catalog.
///
/// Build once and reuse across sources; scanning takes `&self`.
#[derive(Debug, Clone)]
pub struct ScriptScanner {
    patterns: Vec<ScriptPattern>,
    quoted: Regex,
}

impl ScriptScanner {
    /// Compile the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] naming the catalog entry that
    /// failed to compile.
    pub fn new() -> Result<Self> {
        let patterns = CATALOG
            .iter()
            .map(|&(id, pattern, capture)| {
                Ok(ScriptPattern {
                    id,
                    regex: compile(id, pattern)?,
                    capture,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let quoted = compile("quoted-argument", r#"["'`]([^"'`]*)["'`]"#)?;
        Ok(Self { patterns, quoted })
    }

    /// Ids of the catalog entries in match order.
    pub fn pattern_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(|p| p.id)
    }

    /// Collect identifier references from one script source.
    #[must_use]
    pub fn scan(&self, source: SourceId, text: &str) -> IdentifierSet {
        let mut set = IdentifierSet::new(Origin::Script);

        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(first) = caps.get(1) else {
                    continue;
                };
                let line = line_at(text, first.start());
                let mut record = |category: Category, name: &str| {
                    if is_plain_token(name) {
                        set.record(category, name, source, line, pattern.id);
                    }
                };

                match pattern.capture {
                    Capture::ClassList => {
                        if !first.as_str().contains("${") {
                            for name in first.as_str().split_whitespace() {
                                record(Category::Class, name);
                            }
                        }
                    }
                    Capture::QuotedClasses => {
                        for arg in self.quoted.captures_iter(first.as_str()) {
                            if let Some(name) = arg.get(1) {
                                record(Category::Class, name.as_str().trim());
                            }
                        }
                    }
                    Capture::Selector => {
                        if !first.as_str().contains("${") {
                            for (category, name) in selector_identifiers(first.as_str()) {
                                record(category, name);
                            }
                        }
                    }
                    Capture::Id => record(Category::Id, first.as_str().trim()),
                    Capture::Attribute => {
                        let category = if first.as_str() == "class" {
                            Category::Class
                        } else {
                            Category::Id
                        };
                        if let Some(value) = caps.get(2) {
                            if category == Category::Id {
                                record(category, value.as_str().trim());
                            } else if !value.as_str().contains("${") {
                                for name in value.as_str().split_whitespace() {
                                    record(category, name);
                                }
                            }
                        }
                    }
                    Capture::Variable => record(Category::Variable, first.as_str()),
                }
            }
        }

        log::debug!(
            "script {source}: {} reference(s) from {} pattern(s)",
            set.provenance().len(),
            self.patterns.len()
        );
        set
    }
}

fn compile(id: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| CoreError::InvalidPattern {
        id,
        message: err.to_string(),
    })
}

/// Non-empty, no interpolation, only `[A-Za-z0-9_-]`.
fn is_plain_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
