//! Edge-case tests for the stylesheet parser
//!
//! Covers malformed input, string and comment handling, and the partial
//! result contract for unbalanced braces.

use css_audit_core::{
    parser::{IssueKind, IssueSeverity, ParserConfig},
    ParseError, ScopeKind, SourceId, Stylesheet,
};
use pretty_assertions::assert_eq;

fn selectors(sheet: &Stylesheet) -> Vec<&str> {
    sheet.rules().iter().map(|rule| rule.selector()).collect()
}

#[test]
fn test_whitespace_only_input() {
    let sheet = Stylesheet::parse(SourceId(0), " \n\t\r\n ");
    assert!(sheet.rules().is_empty());
    assert!(sheet.issues().is_empty());
    assert!(!sheet.is_partial());
}

#[test]
fn test_comment_only_input() {
    let sheet = Stylesheet::parse(SourceId(0), "/* nothing { here } */");
    assert!(sheet.rules().is_empty());
    assert!(!sheet.is_partial());
}

#[test]
fn test_unterminated_comment_keeps_earlier_rules() {
    let sheet = Stylesheet::parse(SourceId(0), ".a { b: c; }\n/* never closed .d { e: f; }");
    assert_eq!(selectors(&sheet), vec![".a"]);
    assert!(!sheet.is_partial());
    assert_eq!(sheet.issues()[0].kind, IssueKind::UnterminatedComment);
    assert_eq!(sheet.issues()[0].severity, IssueSeverity::Warning);
}

#[test]
fn test_braces_inside_strings_and_urls() {
    let sheet = Stylesheet::parse(
        SourceId(0),
        r#".icon::before { content: "{"; }
.quote::after { content: '}'; }
.bg { background: url("data:image/svg+xml;utf8,<svg>{}</svg>"); }
.escaped::before { content: "\"{"; }
"#,
    );
    assert!(!sheet.is_partial());
    assert_eq!(
        selectors(&sheet),
        vec![".icon::before", ".quote::after", ".bg", ".escaped::before"]
    );
    assert_eq!(sheet.rules()[0].body(), "content: \"{\";");
}

#[test]
fn test_string_broken_by_newline_recovers() {
    let sheet = Stylesheet::parse(SourceId(0), ".a { content: \"open;\n}\n.b { c: d; }");
    assert!(!sheet.is_partial());
    assert_eq!(selectors(&sheet), vec![".a", ".b"]);
    assert_eq!(sheet.issues()[0].kind, IssueKind::UnterminatedString);
}

#[test]
fn test_nested_bodies_are_opaque() {
    let text = "@media screen and (min-width: 40em) {\n  .a { x: 1; }\n  @supports (display: grid) {\n    .b { y: 2; }\n  }\n}";
    let sheet = Stylesheet::parse(SourceId(0), text);
    assert_eq!(sheet.rules().len(), 1);

    let media = &sheet.rules()[0];
    assert_eq!(media.scope_kind(), ScopeKind::Media);
    assert_eq!(media.selector(), "@media screen and (min-width: 40em)");
    assert!(media.body().starts_with(".a { x: 1; }"));
    assert!(media.body().ends_with('}'));
}

#[test]
fn test_unbalanced_braces_return_partial_result() {
    let sheet = Stylesheet::parse(
        SourceId(5),
        ".one { a: b; }\n.two { c: d; }\n.three { e: f;\n.four { g: h; }",
    );
    assert!(sheet.is_partial());
    assert_eq!(selectors(&sheet), vec![".one", ".two"]);
    assert_eq!(
        sheet.fault(),
        Some(&ParseError::UnterminatedBlock { line: 3, depth: 1 })
    );
}

#[test]
fn test_statement_at_rules_produce_no_rules() {
    let sheet = Stylesheet::parse(
        SourceId(0),
        "@charset \"utf-8\";\n@import url('x.css') screen;\n.a { b: c; }",
    );
    assert_eq!(selectors(&sheet), vec![".a"]);
    assert_eq!(sheet.stats().statements, 2);
    assert_eq!(sheet.rules()[0].line(), 3);
}

#[test]
fn test_stray_closing_braces_are_skipped() {
    let sheet = Stylesheet::parse(SourceId(0), ".a { b: c; } }\n}\n.d { e: f; }");
    assert_eq!(selectors(&sheet), vec![".a", ".d"]);
    assert_eq!(
        sheet
            .issues()
            .iter()
            .filter(|issue| issue.kind == IssueKind::StrayCloseBrace)
            .count(),
        2
    );
}

#[test]
fn test_trailing_garbage_is_info() {
    let sheet = Stylesheet::parse(SourceId(0), ".a { b: c; }\n.orphan");
    assert_eq!(sheet.rules().len(), 1);
    assert_eq!(sheet.issues()[0].severity, IssueSeverity::Info);
    assert_eq!(sheet.issues()[0].line, 2);
}

#[test]
fn test_multiline_selector_lists_normalize() {
    let sheet = Stylesheet::parse(SourceId(0), "h1,\n  h2 ,\n\th3\n{ margin: 0 }");
    assert_eq!(selectors(&sheet), vec!["h1, h2 , h3"]);
    assert_eq!(sheet.rules()[0].line(), 1);
}

#[test]
fn test_crlf_line_endings() {
    let sheet = Stylesheet::parse(SourceId(0), ".a {\r\n  b: c;\r\n}\r\n.d { e: f; }\r\n");
    assert_eq!(selectors(&sheet), vec![".a", ".d"]);
    assert_eq!(sheet.rules()[0].body(), "b: c;");
    assert_eq!(sheet.rules()[1].line(), 4);
}

#[test]
fn test_unicode_content() {
    let sheet = Stylesheet::parse(SourceId(0), ".café::after { content: \"→ ✓\"; }\n.日本 { a: b; }");
    assert_eq!(selectors(&sheet), vec![".café::after", ".日本"]);
}

#[test]
fn test_theme_attribute_scope_kind() {
    let config = ParserConfig::default().with_theme_attribute("data-mode");
    let sheet = Stylesheet::parse_with_config(
        SourceId(0),
        "[data-mode=\"dark\"] { --a: 1; }\n[data-theme=\"dark\"] { --a: 2; }",
        &config,
    );
    let kinds: Vec<_> = sheet.rules().iter().map(|r| r.scope_kind()).collect();
    assert_eq!(kinds, vec![ScopeKind::ThemeAttribute, ScopeKind::Plain]);
}

#[test]
fn test_repeated_parse_is_stable() {
    let text = ".a { b: c; }\n@keyframes k { to { x: y; } }\n.open {";
    assert_eq!(
        Stylesheet::parse(SourceId(0), text),
        Stylesheet::parse(SourceId(0), text)
    );
}
