//! Hygiene — source-level rules for the client crate.
//!
//! Production files under `src/` (sibling `*_test.rs` files excluded) are
//! scanned for three kinds of problem:
//!
//! - constructs with a budget: panics are never allowed, silent discards are
//!   capped at what the browser storage glue needs;
//! - log statements that could print the session token or a password;
//! - session plumbing escaping its module: only `util/token_store.rs` touches
//!   `localStorage`, only `net/api.rs` builds the bearer header.
//!
//! Budgets never grow. To add an occurrence, remove another first.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    /// Path relative to `src/`, with `/` separators.
    rel: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut paths = Vec::new();
    collect_rs_paths(&root, &mut paths);
    paths
        .into_iter()
        .filter_map(|path| {
            let rel = path.strip_prefix(&root).ok()?.to_string_lossy().replace('\\', "/");
            if rel.ends_with("_test.rs") {
                return None;
            }
            let content = fs::read_to_string(&path).ok()?;
            Some(SourceFile { rel, content })
        })
        .collect()
}

fn collect_rs_paths(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect_rs_paths(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

/// `file:line: text` for every line containing `pattern`.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(i, line)| format!("{}:{}: {}", file.rel, i + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.rel == "lib.rs"), "scanner did not find src/lib.rs");
    assert!(files.iter().all(|f| !f.rel.ends_with("_test.rs")));
}

// =============================================================================
// budgets
// =============================================================================

const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    ("#[allow(dead_code)]", 0),
    // localStorage lookups (2) and best-effort error-body parsing (1).
    (".ok()", 3),
];

#[test]
fn construct_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for &(pattern, max) in BUDGETS {
        let found = hits(&files, pattern);
        if found.len() > max {
            failures.push(format!("`{pattern}`: found {}, max {max}\n  {}", found.len(), found.join("\n  ")));
        }
    }
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}

// =============================================================================
// secrets in logs
// =============================================================================

/// Fragments that would interpolate a token or password into a log line.
const SECRET_FRAGMENTS: &[&str] = &["{token", ".token", "token}", "token:?", "password", "{credentials", "credentials:?"];

/// Each `log::<level>!` invocation, joined onto one line.
fn log_statements(file: &SourceFile) -> Vec<(usize, String)> {
    let mut statements = Vec::new();
    let mut open: Option<(usize, String)> = None;
    for (i, line) in file.content.lines().enumerate() {
        let text = line.trim();
        let current = match open.take() {
            Some((start, mut buf)) => {
                buf.push(' ');
                buf.push_str(text);
                Some((start, buf))
            }
            None if is_log_macro(text) => Some((i + 1, text.to_owned())),
            None => None,
        };
        match current {
            Some((start, buf)) if buf.contains(");") || buf.ends_with(')') || buf.ends_with("),") => {
                statements.push((start, buf));
            }
            other => open = other,
        }
    }
    statements
}

fn is_log_macro(text: &str) -> bool {
    ["log::trace!", "log::debug!", "log::info!", "log::warn!", "log::error!"]
        .iter()
        .any(|m| text.contains(m))
}

#[test]
fn log_statements_never_print_secrets() {
    let files = source_files();
    let mut leaks = Vec::new();
    for file in &files {
        for (line, statement) in log_statements(file) {
            let lowered = statement.to_lowercase();
            if let Some(fragment) = SECRET_FRAGMENTS.iter().find(|f| lowered.contains(*f)) {
                leaks.push(format!("{}:{line}: `{fragment}` in {statement}", file.rel));
            }
        }
    }
    assert!(leaks.is_empty(), "log statements may expose secrets:\n{}", leaks.join("\n"));
}

#[test]
fn log_scanner_joins_multiline_calls() {
    let file = SourceFile {
        rel: "sample.rs".to_owned(),
        content: "fn f() {\n    log::info!(\n        \"signed in with {}\",\n        session.token\n    );\n}\n".to_owned(),
    };
    let statements = log_statements(&file);
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].0, 2);
    assert!(statements[0].1.contains("session.token"));
}

#[test]
fn logs_exist_to_be_checked() {
    let files = source_files();
    let count: usize = files.iter().map(|f| log_statements(f).len()).sum();
    assert!(count > 0, "no log statements found; scanner is likely broken");
}

// =============================================================================
// session plumbing stays in its module
// =============================================================================

/// `(pattern, the only file allowed to contain it)`.
const CONFINED: &[(&str, &str)] = &[
    ("\"cof_admin_token\"", "util/token_store.rs"),
    ("TOKEN_STORAGE_KEY", "util/token_store.rs"),
    ("local_storage(", "util/token_store.rs"),
    ("\"Bearer ", "net/api.rs"),
];

#[test]
fn session_plumbing_is_confined() {
    let files = source_files();
    let mut strays = Vec::new();
    for &(pattern, owner) in CONFINED {
        for file in files.iter().filter(|f| f.rel != owner) {
            if file.content.contains(pattern) {
                strays.push(format!("`{pattern}` in {} (allowed only in {owner})", file.rel));
            }
        }
    }
    assert!(strays.is_empty(), "session plumbing leaked:\n{}", strays.join("\n"));
}
