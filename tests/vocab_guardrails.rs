use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use mvel::syntax::lexer::{self, TokenKind};
use mvel_core::lang::{conventions, keywords, operators, punctuation};

/// Guardrail against reintroducing stringly-typed vocabulary checks.
///
/// This is intentionally a **coarse** safety net. It looks for suspicious patterns like `== "BigDecimal"` or
/// `match name { "Integer" => ... }` in Rust source files where we expect callers to go through `mvel_core::lang`
/// registries (`conventions::boxed_type`, `conventions::is_arbitrary_precision`, ...) instead.
///
/// Notes:
/// - We allow occurrences in `crates/mvel_core/src/lang/**` (registries themselves) and in tests.
/// - This is not meant to be perfect; it’s meant to catch “oops I added a string match”.
#[test]
fn no_new_stringly_vocab_checks_in_rust_sources() {
    let root = repo_root();
    let spellings = tier_a_spellings();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [root.join("src"), root.join("crates")];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed vocabulary checks. Prefer mvel_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

/// Every registry spelling lexes to exactly one token carrying the registry id.
#[test]
fn registry_spellings_lex_to_their_ids() {
    for k in keywords::KEYWORDS {
        let tokens = lexer::lex(k.canonical).unwrap_or_else(|e| panic!("lex({:?}) failed: {e}", k.canonical));
        assert_eq!(tokens[0].kind, TokenKind::Keyword(k.id), "keyword {:?}", k.canonical);
    }
    for o in operators::OPERATORS {
        let tokens = lexer::lex(o.spelling).unwrap_or_else(|e| panic!("lex({:?}) failed: {e}", o.spelling));
        let expected = if o.is_keyword_spelling {
            TokenKind::Keyword(keywords::from_str(o.spelling).expect("word operator is a keyword"))
        } else {
            TokenKind::Operator(o.id)
        };
        assert_eq!(tokens[0].kind, expected, "operator {:?}", o.spelling);
    }
    for p in punctuation::PUNCTUATION {
        let tokens = lexer::lex(p.canonical).unwrap_or_else(|e| panic!("lex({:?}) failed: {e}", p.canonical));
        assert_eq!(tokens[0].kind, TokenKind::Punctuation(p.id), "punctuation {:?}", p.canonical);
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn tier_a_spellings() -> Vec<&'static str> {
    // Tier A: high-signal, drift-prone vocabulary.
    // - Arbitrary-precision and textual type names
    // - Primitive and boxed numeric type names
    // - Word operators
    let mut set: BTreeSet<&'static str> = BTreeSet::new();

    set.insert(conventions::BIG_DECIMAL);
    set.insert(conventions::BIG_INTEGER);
    set.insert(conventions::STRING);

    for b in conventions::BOXED_TYPES {
        set.insert(b.primitive);
        set.insert(b.boxed);
    }

    for o in operators::OPERATORS.iter().filter(|o| o.is_keyword_spelling) {
        set.insert(o.spelling);
    }

    set.into_iter().collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings; allow them.
    if rel.starts_with("crates/mvel_core/src/lang/") {
        return true;
    }
    // Tests can mention spellings directly.
    if rel.starts_with("tests/") || rel.ends_with("/tests.rs") {
        return true;
    }
    false
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    // Avoid false positives in comments/docstrings.
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") || trimmed.starts_with("///") || trimmed.starts_with("//!") {
        return false;
    }

    // Only flag explicit equality checks or match arms for known vocabulary spellings.
    for s in spellings {
        // Patterns we consider "stringly vocab checks":
        // - `... == "Spelling"`
        // - `"Spelling" => ...`
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        if line.contains(&eq) || line.contains(&arm) {
            return true;
        }
    }

    false
}
