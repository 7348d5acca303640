//! End-to-end analysis tests: legacy vs. current stylesheets
//!
//! Models the migration audit workflow: merge the current stylesheets,
//! diff theme variables against the legacy set, check animation bindings
//! and score identifier preservation.

use css_audit_core::{
    analysis::{
        audit::{audit, AuditConfig, AuditSeverity},
        compare, AnalysisConfig, BindingFinding, Category, CategorySet, IntegrityGrade,
        ScopeConfig, Score,
    },
    merge::CascadeMerger,
    SourceId, Stylesheet, StylesheetAnalysis,
};
use pretty_assertions::assert_eq;

const LEGACY: &str = r#"
:root {
  --bg: #ffffff;
  --fg: #111;
  --accent: #0af;
}
[data-theme="dark"] {
  --bg: #000;
  --fg: #eee;
}
.toolbar { display: flex; }
.toolbar .btn { animation: pulse 1s ease-in-out infinite; }
#overlay { position: fixed; }
.toast { animation: slide-in .3s both; }
@keyframes pulse { 50% { opacity: .5; } }
@keyframes slide-in { from { transform: translateY(10px); } }
"#;

const BASE: &str = r#"
:root {
  --bg: #ffffff;
  --fg: #111;
}
[data-theme='dark'] { --bg: #000; --fg: #ddd; }
.toolbar { display: flex; }
.toolbar .btn { animation: pulse 1s ease-in-out infinite; }
@keyframes pulse { 50% { opacity: .5; } }
@keyframes wobble { to { rotate: 3deg; } }
"#;

const THEME: &str = r"
.toolbar { display: grid; gap: 4px; }
.toast { animation: slide-in .3s both; }
";

fn parse_all() -> (Stylesheet, Vec<Stylesheet>) {
    (
        Stylesheet::parse(SourceId(0), LEGACY),
        vec![
            Stylesheet::parse(SourceId(1), BASE),
            Stylesheet::parse(SourceId(2), THEME),
        ],
    )
}

#[test]
fn merge_current_layers() {
    let (_, current) = parse_all();
    let merged = CascadeMerger::new().merge_stylesheets(&current);

    let selectors: Vec<_> = merged.rules().iter().map(|r| r.selector()).collect();
    assert_eq!(
        selectors,
        vec![
            ":root",
            "[data-theme='dark']",
            ".toolbar",
            ".toolbar .btn",
            "@keyframes pulse",
            "@keyframes wobble",
            ".toast",
        ]
    );
    assert_eq!(merged.rules()[2].body(), "display: grid; gap: 4px;");
    assert_eq!(merged.conflicts().len(), 1);
    assert_eq!(merged.conflicts()[0].winning_source, SourceId(2));

    let reparsed = Stylesheet::parse(SourceId(9), &merged.to_css());
    assert_eq!(reparsed.rules().len(), merged.rules().len());
}

#[test]
fn theme_variable_diff() {
    let (legacy, current) = parse_all();
    let config = AnalysisConfig::default();
    let reference = StylesheetAnalysis::analyze(std::slice::from_ref(&legacy), &config);
    let now = StylesheetAnalysis::analyze(&current, &config);

    let diff = reference.variables().diff(now.variables());
    let missing: Vec<_> = diff.all_missing().collect();
    assert_eq!(missing, vec![(":root", "--accent")]);

    let changed: Vec<_> = diff
        .all_changed()
        .map(|(scope, change)| (scope, change.name.as_str(), change.current.as_str()))
        .collect();
    assert_eq!(changed, vec![("[data-theme=\"dark\"]", "--fg", "#ddd")]);
    assert!(diff.unmatched_current_scopes().is_empty());
}

#[test]
fn hex_normalized_diff_ignores_spelling() {
    let config = AnalysisConfig::default()
        .with_scope(ScopeConfig::default().with_hex_normalization(true));
    let a = StylesheetAnalysis::analyze(
        &[Stylesheet::parse(SourceId(0), ":root { --c: #fff; }")],
        &config,
    );
    let b = StylesheetAnalysis::analyze(
        &[Stylesheet::parse(SourceId(1), ":root { --c: #FFFFFF; }")],
        &config,
    );
    assert!(a.variables().diff(b.variables()).is_clean());
    assert_eq!(a.variables().get(":root", "--c"), Some("255 255 255"));
}

#[test]
fn animation_bindings_across_files() {
    let (_, current) = parse_all();
    let analysis = StylesheetAnalysis::analyze(&current, &AnalysisConfig::default());
    let bindings = analysis.bindings();

    assert_eq!(bindings.matched(), ["pulse".to_string()]);
    assert_eq!(
        bindings.findings(),
        vec![
            BindingFinding::MissingKeyframe("slide-in".to_string()),
            BindingFinding::UnusedKeyframe("wobble".to_string()),
        ]
    );
    let reference = &bindings.references()[1];
    assert_eq!((reference.source, reference.line), (SourceId(2), 3));
}

#[test]
fn identifier_preservation() {
    let (legacy, current) = parse_all();
    let config = AnalysisConfig::default();
    let reference = StylesheetAnalysis::analyze(std::slice::from_ref(&legacy), &config);
    let now = StylesheetAnalysis::analyze(&current, &config);

    let report = compare(
        reference.identifiers(),
        now.identifiers(),
        CategorySet::CLASS | CategorySet::ID | CategorySet::KEYFRAME,
    );

    let classes = report.category(Category::Class).map(|c| c.score);
    assert_eq!(classes, Some(Score::Percent(100.0)));
    let ids = report.category(Category::Id).map(|c| c.missing.len());
    assert_eq!(ids, Some(1));
    let keyframes = report.category(Category::Keyframe);
    assert_eq!(keyframes.map(|c| c.missing.len()), Some(1));
    assert_eq!(keyframes.map(|c| c.extra[0].name.as_str()), Some("wobble"));

    // 4 of 6 reference names survive: all 3 classes and 1 of 2 keyframes
    assert_eq!(report.aggregate(), Score::Percent(66.7));
    assert_eq!(report.grade(), IntegrityGrade::Poor);
    assert!(!report.is_advisory());
}

#[test]
fn audit_flags_migration_problems() {
    let (_, current) = parse_all();
    let analysis = StylesheetAnalysis::analyze(&current, &AnalysisConfig::default());
    let issues = audit(
        &analysis,
        &AuditConfig::default().with_min_severity(AuditSeverity::Warning),
    );

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id(), "missing-keyframe");
    assert_eq!(issues[0].source(), Some(SourceId(2)));
}

#[cfg(feature = "script")]
#[test]
fn script_coverage_is_advisory() {
    use css_audit_core::analysis::{coverage, ScriptScanner};

    let (_, current) = parse_all();
    let analysis = StylesheetAnalysis::analyze(&current, &AnalysisConfig::default());
    let scanner = ScriptScanner::new().expect("catalog compiles");
    let script = scanner.scan(
        SourceId(10),
        "document.querySelector('.toolbar .btn').classList.add('is-active');\nroot.style.setProperty('--bg', c);",
    );

    let report = coverage(&script, analysis.identifiers());
    assert!(report.is_advisory());
    let missing: Vec<_> = report
        .category(Category::Class)
        .map(|c| c.missing.iter().map(|m| m.name.clone()).collect())
        .unwrap_or_default();
    assert_eq!(missing, vec!["is-active".to_string()]);
    assert_eq!(
        report.category(Category::Variable).map(|c| c.score),
        Some(Score::Percent(100.0))
    );
}
