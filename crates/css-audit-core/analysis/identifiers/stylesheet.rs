//! Identifier extraction from parsed stylesheets

use super::{Category, IdentifierSet, Origin};
use crate::{
    analysis::animations::AnimationNameRule,
    parser::{declarations, ParserConfig, Rule, ScopeKind, Stylesheet},
};

/// At-rules whose bodies hold ordinary rules.
const GROUPING_AT_RULES: &[&str] = &["supports", "layer", "container", "document", "scope"];

/// Extract every identifier category from one stylesheet.
///
/// Grouping blocks are re-parsed with `parser` to reach their inner rules.
/// Keyframe bodies are searched for custom properties only; frame selectors
/// such as `50%` never yield classes.
#[must_use]
pub fn extract_stylesheet(
    sheet: &Stylesheet,
    parser: &ParserConfig,
    names: &AnimationNameRule,
) -> IdentifierSet {
    let mut set = IdentifierSet::new(Origin::Stylesheet);
    collect_rules(sheet.rules(), parser, names, &mut set);
    log::debug!(
        "source {}: {} class(es), {} id(s), {} variable(s), {} keyframe(s)",
        sheet.source(),
        set.tally(Category::Class).len(),
        set.tally(Category::Id).len(),
        set.tally(Category::Variable).len(),
        set.tally(Category::Keyframe).len()
    );
    set
}

fn collect_rules(
    rules: &[Rule],
    parser: &ParserConfig,
    names: &AnimationNameRule,
    set: &mut IdentifierSet,
) {
    for rule in rules {
        match rule.scope_kind() {
            ScopeKind::Keyframes => {
                if let Some(name) = rule.keyframes_name() {
                    set.record(
                        Category::Keyframe,
                        name,
                        rule.source(),
                        rule.line(),
                        rule.selector(),
                    );
                }
                collect_variables(rule, set);
            }
            ScopeKind::Media => collect_nested(rule, parser, names, set),
            _ if is_grouping_at_rule(rule.selector()) => collect_nested(rule, parser, names, set),
            _ => {
                if !rule.selector().starts_with('@') {
                    for (category, name) in selector_identifiers(rule.selector()) {
                        set.record(category, name, rule.source(), rule.line(), rule.selector());
                    }
                }
                collect_variables(rule, set);
                collect_animation_refs(rule, names, set);
            }
        }
    }
}

fn collect_nested(
    rule: &Rule,
    parser: &ParserConfig,
    names: &AnimationNameRule,
    set: &mut IdentifierSet,
) {
    let inner = Stylesheet::parse_nested(rule, parser);
    collect_rules(inner.rules(), parser, names, set);
}

fn is_grouping_at_rule(selector: &str) -> bool {
    selector
        .strip_prefix('@')
        .and_then(|rest| rest.split(|c: char| c.is_whitespace() || c == '(').next())
        .is_some_and(|keyword| {
            GROUPING_AT_RULES
                .iter()
                .any(|grouping| keyword.eq_ignore_ascii_case(grouping))
        })
}

/// `--name` tokens anywhere in the body, declared or referenced.
fn collect_variables(rule: &Rule, set: &mut IdentifierSet) {
    let body = rule.body();
    let bytes = body.as_bytes();
    let mut lines = LineCursor::new(body, rule.body_line());

    let mut from = 0;
    while let Some(found) = body[from..].find("--") {
        let at = from + found;
        let len = ident_len(&body[at + 2..]);
        let preceded = at > 0 && is_ident_byte(bytes[at - 1]);
        if !preceded && len > 0 {
            let line = lines.line_at(at);
            set.record(
                Category::Variable,
                &body[at..at + 2 + len],
                rule.source(),
                line,
                rule.selector(),
            );
        }
        from = at + 2 + len;
    }
}

fn collect_animation_refs(rule: &Rule, names: &AnimationNameRule, set: &mut IdentifierSet) {
    let body = rule.body();
    let mut lines = LineCursor::new(body, rule.body_line());
    for declaration in declarations(body) {
        if !names.is_animation_property(&declaration) {
            continue;
        }
        if let Some(name) = names.referenced_name(declaration.value) {
            let context = format!("{}: {}", declaration.property, declaration.value);
            set.record(
                Category::AnimationRef,
                name,
                rule.source(),
                lines.line_at(declaration.offset),
                &context,
            );
        }
    }
}

/// Class and id names in a selector, in order of appearance.
///
/// Attribute selector contents and quoted strings are skipped. Pseudo-class
/// arguments are searched, so `:not(.hidden)` yields `hidden`.
#[must_use]
pub fn selector_identifiers(selector: &str) -> Vec<(Category, &str)> {
    let bytes = selector.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            quote @ (b'"' | b'\'') => i = skip_string(bytes, i + 1, quote),
            b'[' => i = skip_attribute(bytes, i + 1),
            marker @ (b'.' | b'#') => {
                let start = i + 1;
                let rest = &selector[start..];
                let len = ident_len(rest);
                if len > 0 && starts_identifier(rest) {
                    let category = if marker == b'.' {
                        Category::Class
                    } else {
                        Category::Id
                    };
                    found.push((category, &rest[..len]));
                }
                i = start + len;
            }
            _ => i += 1,
        }
    }
    found
}

/// Index just past the closing quote.
fn skip_string(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index just past the closing `]`.
fn skip_attribute(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            quote @ (b'"' | b'\'') => i = skip_string(bytes, i + 1, quote),
            b']' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

pub(crate) const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte >= 0x80
}

fn ident_len(text: &str) -> usize {
    text.bytes().take_while(|&b| is_ident_byte(b)).count()
}

/// Letter, `_`, or `-` followed by something other than a digit.
fn starts_identifier(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(&b'-') => bytes
            .get(1)
            .is_some_and(|&next| is_ident_byte(next) && !next.is_ascii_digit()),
        Some(&first) => first.is_ascii_alphabetic() || first == b'_' || first >= 0x80,
        None => false,
    }
}

/// Forward-only offset to line conversion.
struct LineCursor<'a> {
    text: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str, first_line: usize) -> Self {
        Self {
            text: text.as_bytes(),
            offset: 0,
            line: first_line,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        if offset > self.offset {
            self.line += self.text[self.offset..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.offset = offset;
        }
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceId;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> IdentifierSet {
        let sheet = Stylesheet::parse(SourceId(0), text);
        extract_stylesheet(&sheet, &ParserConfig::default(), &AnimationNameRule::default())
    }

    #[test]
    fn selector_tokens() {
        let found = selector_identifiers(
            ".btn.primary:hover > #main .card::before, .x[data-a='.y'] :not(.z)",
        );
        assert_eq!(
            found,
            vec![
                (Category::Class, "btn"),
                (Category::Class, "primary"),
                (Category::Id, "main"),
                (Category::Class, "card"),
                (Category::Class, "x"),
                (Category::Class, "z"),
            ]
        );
    }

    #[test]
    fn numeric_fragments_are_not_identifiers() {
        assert!(selector_identifiers(".5em, #123, .-2x").is_empty());
        assert_eq!(
            selector_identifiers(".-webkit-thing ._private"),
            vec![(Category::Class, "-webkit-thing"), (Category::Class, "_private")]
        );
    }

    #[test]
    fn extracts_all_categories() {
        let set = extract(
            r":root { --accent: #ff0; }
.panel { color: var(--accent); animation: glow 2s infinite; }
#main .panel { margin: 0; }
@media (max-width: 600px) {
  .panel .title { -webkit-animation-name: fade; }
}
@keyframes glow { from { opacity: 0; } to { opacity: 1; } }
",
        );

        assert_eq!(set.count(Category::Class, "panel"), 3);
        assert_eq!(set.count(Category::Class, "title"), 1);
        assert_eq!(set.count(Category::Id, "main"), 1);
        assert_eq!(set.count(Category::Variable, "--accent"), 2);
        assert_eq!(set.count(Category::Keyframe, "glow"), 1);
        assert_eq!(set.count(Category::AnimationRef, "glow"), 1);
        assert_eq!(set.count(Category::AnimationRef, "fade"), 1);
        assert!(!set.contains(Category::Class, "from"));
    }

    #[test]
    fn provenance_lines_follow_source() {
        let set = extract(".a {\n  color: red;\n  --gap: 1px;\n}\n@media print {\n\n  .b { x: y; }\n}");
        let gap = set.occurrences(Category::Variable, "--gap").next().map(|p| p.line);
        assert_eq!(gap, Some(3));
        let b = set.occurrences(Category::Class, "b").next().map(|p| p.line);
        assert_eq!(b, Some(7));
    }

    #[test]
    fn supports_blocks_are_searched() {
        let set = extract("@supports (display: grid) { .grid { display: grid; } }");
        assert!(set.contains(Category::Class, "grid"));
        assert!(!set.contains(Category::Class, "supports"));
    }

    #[test]
    fn keyframe_bodies_contribute_variables() {
        let set = extract(
            ":root { --accent: red; }\n@keyframes pulse {\n  50% { color: var(--accent); --glow: 1; }\n}",
        );

        assert_eq!(set.count(Category::Variable, "--accent"), 2);
        assert_eq!(set.count(Category::Variable, "--glow"), 1);
        assert_eq!(set.count(Category::Keyframe, "pulse"), 1);
        let glow = set.occurrences(Category::Variable, "--glow").next();
        assert_eq!(glow.map(|p| (p.line, p.context.as_str())), Some((3, "@keyframes pulse")));
        assert!(set.tally(Category::Class).is_empty());
        assert!(set.tally(Category::AnimationRef).is_empty());
    }

    #[test]
    fn double_dash_inside_words_is_not_a_variable() {
        let set = extract(".a { grid-area: main--wide; --ok: 1; }");
        let names: Vec<_> = set.tally(Category::Variable).names().collect();
        assert_eq!(names, vec!["--ok"]);
    }
}
