//! Hygiene — enforces coding standards at test time.
//!
//! Scans the production source tree (`src/`, excluding `_test.rs` siblings)
//! for antipatterns. Every pattern has a budget of zero: runtime contract
//! violations in this crate are logged no-ops, never panics, and errors are
//! surfaced through `StageError` rather than discarded.

use std::fs;
use std::path::Path;

/// (pattern, label) pairs that must not appear in production code.
const FORBIDDEN: &[(&str, &str)] = &[
    // Panics — these crash the process.
    (".unwrap()", "panicking unwrap"),
    (".expect(", "panicking expect"),
    ("panic!(", "explicit panic"),
    ("unreachable!(", "unreachable macro"),
    ("todo!(", "todo stub"),
    ("unimplemented!(", "unimplemented stub"),
    // Silent loss — discards errors without inspecting.
    ("let _ =", "silently discarded value"),
    (".ok()", "silently dropped error"),
    // Structure.
    ("#[allow(dead_code)]", "suppressed dead-code lint"),
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

/// Lines in `file` containing `pattern`, as `path:line` strings.
fn hits(file: &SourceFile, pattern: &str) -> Vec<String> {
    file.content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(pattern))
        .map(|(index, _)| format!("  {}:{}", file.path, index + 1))
        .collect()
}

#[test]
fn source_tree_is_scanned() {
    let files = source_files();
    assert!(files.len() >= 10, "expected the full module set under src/, found {}", files.len());
}

#[test]
fn forbidden_patterns_stay_at_zero() {
    let files = source_files();
    let mut report = String::new();
    for (pattern, label) in FORBIDDEN {
        for file in &files {
            for hit in hits(file, pattern) {
                report.push_str(&format!("{label} ({pattern}):\n{hit}\n"));
            }
        }
    }
    assert!(report.is_empty(), "hygiene violations found:\n{report}");
}
