//! End-to-end runs of the `css-audit` binary

use std::{fs, path::Path, process::Command};

fn css_audit(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_css-audit"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn merge_prints_merged_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(dir.path(), "base.css", ".a { color: red; }\n.b { margin: 0; }\n");
    let theme = write(dir.path(), "theme.css", ".a { color: blue; }\n");

    let (code, stdout, _) = css_audit(&["merge", &base, &theme]);
    assert_eq!(code, 0);
    assert_eq!(stdout, ".a {\n    color: blue;\n}\n\n.b {\n    margin: 0;\n}\n");
}

#[test]
fn merge_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(dir.path(), "base.css", ".a { color: red; }\n");
    let theme = write(dir.path(), "theme.css", ".a { color: blue; }\n");
    let out = dir.path().join("out.css");

    let (code, _, stderr) = css_audit(&["merge", &base, &theme, "--out", out.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stderr.contains("1 rules, 1 conflicts"));
    assert!(fs::read_to_string(out).unwrap().contains("color: blue;"));
}

#[test]
fn animations_json_lists_missing_keyframes() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write(
        dir.path(),
        "anim.css",
        ".x { animation: ghost 1s; }\n@keyframes unused { to { opacity: 1; } }\n",
    );

    let (code, stdout, _) = css_audit(&["animations", &sheet, "--json"]);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["missing"], serde_json::json!(["ghost"]));
    assert_eq!(report["unused"], serde_json::json!(["unused"]));
}

#[test]
fn vars_reports_missing_and_extra() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(dir.path(), "old.css", ":root { --a: 1; --b: 2; }\n");
    let new = write(dir.path(), "new.css", ":root { --a: 1; --c: 3; }\n");

    let (code, stdout, _) = css_audit(&["vars", "--reference", &old, &new]);
    assert_eq!(code, 0);
    assert!(stdout.contains("  - --b"));
    assert!(stdout.contains("  + --c"));
}

#[test]
fn audit_fails_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write(dir.path(), "a.css", ".x { animation: ghost 1s; }\n");

    let (code, stdout, _) = css_audit(&["audit", &sheet]);
    assert_eq!(code, 1);
    assert!(stdout.contains("[missing-keyframe]"));

    let (code, _, _) = css_audit(&["audit", &sheet, "--disable", "missing-keyframe"]);
    assert_eq!(code, 0);
}

#[test]
fn missing_input_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.css");

    let (code, stdout, _) = css_audit(&["animations", absent.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("matched:"));
}

#[test]
fn usage_errors_exit_with_two() {
    let (code, _, stderr) = css_audit(&["frobnicate", "a.css"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("frobnicate"));

    let (code, _, _) = css_audit(&["vars", "a.css"]);
    assert_eq!(code, 2);
}

#[test]
fn merge_marks_identical_redefinitions() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(dir.path(), "base.css", ".a { color: red; }\n.b { margin: 0; }\n");
    let page = write(dir.path(), "page.css", ".a { color: red; }\n.b { margin: 4px; }\n");

    let (code, stdout, _) = css_audit(&["merge", &base, &page, "--json"]);
    assert_eq!(code, 0);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["conflicts"][0]["identical"], serde_json::json!(true));
    assert_eq!(summary["conflicts"][1]["identical"], serde_json::json!(false));
}

#[test]
fn split_writes_base_and_theme_files() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write(
        dir.path(),
        "themes.css",
        ":root { --bg: #fff; }\n[data-theme=\"dark\"] { --bg: #000; }\n.card { padding: 0; }\n[data-theme=\"neon\"] .card { color: lime; }\n",
    );
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let (code, stdout, _) = css_audit(&["split", &sheet, "--out-dir", out.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("4 of 4 rule(s) written"));

    let base = fs::read_to_string(out.join("base.css")).unwrap();
    assert!(base.contains(":root {") && base.contains(".card {"));
    assert!(!base.contains("data-theme"));
    assert!(fs::read_to_string(out.join("theme-dark.css")).unwrap().contains("--bg: #000;"));
    assert!(fs::read_to_string(out.join("theme-neon.css")).unwrap().contains("color: lime;"));
}
