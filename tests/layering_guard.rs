//! Layering guardrails for the workspace crates.
//!
//! `mvel_core` is pure vocabulary and carries no dependencies. `mvel_syntax` sits on `mvel_core` only and must never
//! reach up into the translator crate. These tests scan the member manifests' `[dependencies]` tables.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = dependency_names(include_str!("../crates/mvel_core/Cargo.toml"));
    assert!(deps.is_empty(), "mvel_core must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_translator() {
    let deps = dependency_names(include_str!("../crates/mvel_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "mvel_core"));
    assert!(
        !deps.iter().any(|d| d == "mvel"),
        "`mvel_syntax` must not depend on the `mvel` crate"
    );
}
