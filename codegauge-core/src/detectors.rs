//! Issue detectors.
//!
//! Each detector is one independent rule over a source file. Detectors are
//! order-insensitive with respect to each other; the registry order in
//! [`default_detectors`] fixes the order issues appear in an analysis, and
//! every detector reports its findings in ascending line order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Issue, Severity, SourceFile};
use crate::language::{Family, Language};

/// Maximum allowed line length before the line-too-long detector fires.
pub const MAX_LINE_LENGTH: usize = 120;

/// TODO/FIXME messages echo the offending line, capped at this many chars.
const TODO_MESSAGE_LIMIT: usize = 50;

/// A single independent rule that scans a file and yields zero or more issues.
pub trait Detector {
    /// Stable identifier of the rule, used as the issue kind tag.
    fn id(&self) -> &'static str;
    /// Scan the file and return findings in ascending line order.
    fn scan(&self, file: &SourceFile) -> Vec<Issue>;
}

/// Build the default detector battery in declaration order.
pub fn default_detectors() -> Vec<Box<dyn Detector + Send + Sync>> {
    vec![
        Box::new(UnusedImports),
        Box::new(HardcodedSecrets),
        Box::new(LineLength),
        Box::new(MissingDocs),
        Box::new(TodoComments),
        Box::new(DebugStatements),
    ]
}

struct UnusedImports;

impl Detector for UnusedImports {
    fn id(&self) -> &'static str {
        "unused-import"
    }

    fn scan(&self, file: &SourceFile) -> Vec<Issue> {
        let Some(family) = file.language.family() else {
            return Vec::new();
        };
        let lines: Vec<&str> = file.content.lines().collect();
        let mut issues = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            for name in import_bindings(family, line) {
                if !used_elsewhere(&lines, &name, idx) {
                    issues.push(Issue::at_line(
                        self.id(),
                        Severity::Info,
                        idx + 1,
                        format!("Imported name `{name}` is never used"),
                    ));
                }
            }
        }

        issues
    }
}

struct HardcodedSecrets;

static SECRET_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:password|passwd|pwd|secret|token|api[_-]?key)\b\s*[:=]\s*["']"#)
        .expect("secret pattern compiles")
});

impl Detector for HardcodedSecrets {
    fn id(&self) -> &'static str {
        "hardcoded-secret"
    }

    fn scan(&self, file: &SourceFile) -> Vec<Issue> {
        file.content
            .lines()
            .enumerate()
            .filter(|(_, line)| SECRET_ASSIGNMENT.is_match(line))
            .map(|(idx, _)| {
                Issue::at_line(
                    self.id(),
                    Severity::Critical,
                    idx + 1,
                    "Potential hardcoded secret detected",
                )
            })
            .collect()
    }
}

struct LineLength;

impl Detector for LineLength {
    fn id(&self) -> &'static str {
        "line-too-long"
    }

    fn scan(&self, file: &SourceFile) -> Vec<Issue> {
        file.content
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let length = line.chars().count();
                if length <= MAX_LINE_LENGTH {
                    return None;
                }
                Some(Issue::at_line(
                    self.id(),
                    Severity::Info,
                    idx + 1,
                    format!("Line length: {length} characters"),
                ))
            })
            .collect()
    }
}

struct MissingDocs;

static PYTHON_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:async\s+)?(?:def|class)\s+(\w+)").expect("python def pattern"));
static ECMA_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?(?:async\s+)?(?:function|class)\s+(\w+)")
        .expect("ecmascript def pattern")
});
static RUST_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:unsafe\s+)?(?:fn|struct|enum|trait)\s+(\w+)")
        .expect("rust def pattern")
});
static GO_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:func|type)\s+(?:\([^)]*\)\s*)?(\w+)").expect("go def pattern")
});
static JAVA_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|protected|private)\s+)?(?:static\s+)?(?:final\s+)?(?:abstract\s+)?(?:class|interface|enum)\s+(\w+)",
    )
    .expect("java def pattern")
});

fn definition_pattern(family: Family) -> &'static Regex {
    match family {
        Family::Python => &PYTHON_DEF,
        Family::EcmaScript => &ECMA_DEF,
        Family::Rust => &RUST_DEF,
        Family::Go => &GO_DEF,
        Family::Java => &JAVA_DEF,
    }
}

impl Detector for MissingDocs {
    fn id(&self) -> &'static str {
        "missing-docs"
    }

    fn scan(&self, file: &SourceFile) -> Vec<Issue> {
        let Some(family) = file.language.family() else {
            return Vec::new();
        };
        let pattern = definition_pattern(family);
        let lines: Vec<&str> = file.content.lines().collect();
        let mut issues = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let Some(captures) = pattern.captures(line) else {
                continue;
            };
            let name = captures
                .get(1)
                .map(|capture| capture.as_str())
                .unwrap_or("definition");
            let documented = has_doc_above(file.language, family, &lines, idx)
                || lines
                    .get(idx + 1)
                    .map(|next| file.language.starts_doc_quote(next))
                    .unwrap_or(false);
            if !documented {
                issues.push(Issue::at_line(
                    self.id(),
                    Severity::Info,
                    idx + 1,
                    format!("Missing documentation for `{name}`"),
                ));
            }
        }

        issues
    }
}

fn has_doc_above(language: Language, family: Family, lines: &[&str], idx: usize) -> bool {
    for line in lines[..idx].iter().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        // Attributes and decorators sit between a doc comment and its item.
        if is_annotation(family, trimmed) {
            continue;
        }
        return language.is_comment_line(line);
    }
    false
}

fn is_annotation(family: Family, trimmed: &str) -> bool {
    match family {
        Family::Rust => trimmed.starts_with("#["),
        Family::Python | Family::Java | Family::EcmaScript => trimmed.starts_with('@'),
        Family::Go => false,
    }
}

struct TodoComments;

impl Detector for TodoComments {
    fn id(&self) -> &'static str {
        "todo-comment"
    }

    fn scan(&self, file: &SourceFile) -> Vec<Issue> {
        file.content
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains("TODO") || line.contains("FIXME"))
            .map(|(idx, line)| {
                let message: String = line.trim().chars().take(TODO_MESSAGE_LIMIT).collect();
                Issue::at_line(self.id(), Severity::Info, idx + 1, message)
            })
            .collect()
    }
}

struct DebugStatements;

const DEBUG_MARKERS: [&str; 3] = ["print(", "console.log", "println"];

impl Detector for DebugStatements {
    fn id(&self) -> &'static str {
        "debug-statement"
    }

    fn scan(&self, file: &SourceFile) -> Vec<Issue> {
        file.content
            .lines()
            .enumerate()
            .filter(|(_, line)| {
                let lowered = line.to_lowercase();
                DEBUG_MARKERS.iter().any(|marker| lowered.contains(marker))
            })
            .map(|(idx, _)| {
                Issue::at_line(self.id(), Severity::Warning, idx + 1, "Debug statement found")
            })
            .collect()
    }
}

fn import_bindings(family: Family, line: &str) -> Vec<String> {
    let trimmed = line.trim();
    match family {
        Family::Python => python_bindings(trimmed),
        Family::EcmaScript => ecmascript_bindings(trimmed),
        Family::Rust => rust_bindings(trimmed),
        Family::Go => go_bindings(trimmed),
        Family::Java => java_bindings(trimmed),
    }
}

fn python_bindings(line: &str) -> Vec<String> {
    if let Some(rest) = line.strip_prefix("import ") {
        return rest
            .split(',')
            .filter_map(|part| {
                let part = part.trim();
                let name = match part.split_once(" as ") {
                    Some((_, alias)) => alias.trim(),
                    None => part.split('.').next().unwrap_or(part).trim(),
                };
                is_identifier(name).then(|| name.to_string())
            })
            .collect();
    }

    if line.starts_with("from ") {
        if let Some((_, imported)) = line.split_once(" import ") {
            if imported.contains('*') {
                return Vec::new();
            }
            let imported = imported.trim().trim_start_matches('(').trim_end_matches(')');
            return imported
                .split(',')
                .filter_map(|part| {
                    let part = part.trim();
                    let name = match part.split_once(" as ") {
                        Some((_, alias)) => alias.trim(),
                        None => part,
                    };
                    is_identifier(name).then(|| name.to_string())
                })
                .collect();
        }
    }

    Vec::new()
}

static ES_REQUIRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:const|let|var)\s+(\w+)\s*=\s*require\s*\(").expect("require pattern")
});

fn ecmascript_bindings(line: &str) -> Vec<String> {
    if let Some(captures) = ES_REQUIRE.captures(line) {
        return vec![captures[1].to_string()];
    }

    let Some(rest) = line.strip_prefix("import ") else {
        return Vec::new();
    };
    let clause = rest.strip_prefix("type ").unwrap_or(rest);
    let clause = clause.split(" from ").next().unwrap_or(clause);
    let clause = clause.trim().trim_end_matches(';').trim();
    // Side-effect imports bind nothing.
    if clause.starts_with('"') || clause.starts_with('\'') {
        return Vec::new();
    }

    let mut names = Vec::new();
    let (outside, inside) = match clause.find('{') {
        Some(open) => {
            let close = clause.find('}').unwrap_or(clause.len());
            let tail_start = (close + 1).min(clause.len());
            (
                format!("{}{}", &clause[..open], &clause[tail_start..]),
                clause[open + 1..close].to_string(),
            )
        }
        None => (clause.to_string(), String::new()),
    };

    for part in outside.split(',') {
        let part = part.trim();
        if let Some(alias) = part.strip_prefix("* as ") {
            let alias = alias.trim();
            if is_identifier(alias) {
                names.push(alias.to_string());
            }
        } else if is_identifier(part) {
            names.push(part.to_string());
        }
    }
    for part in inside.split(',') {
        let part = part.trim();
        let name = match part.split_once(" as ") {
            Some((_, alias)) => alias.trim(),
            None => part,
        };
        if is_identifier(name) {
            names.push(name.to_string());
        }
    }

    names
}

fn rust_bindings(line: &str) -> Vec<String> {
    let Some(rest) = line.strip_prefix("use ") else {
        return Vec::new();
    };
    let rest = rest.trim_end_matches(';').trim();
    // Grouped and glob imports bind more than one name; skip them.
    if rest.contains('{') || rest.contains('*') {
        return Vec::new();
    }
    let name = match rest.rsplit_once(" as ") {
        Some((_, alias)) => alias.trim(),
        None => rest.rsplit("::").next().unwrap_or(rest).trim(),
    };
    if is_identifier(name) {
        vec![name.to_string()]
    } else {
        Vec::new()
    }
}

static GO_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^import\s+(?:([A-Za-z_]\w*)\s+)?"([^"]+)""#).expect("go import pattern")
});

fn go_bindings(line: &str) -> Vec<String> {
    let Some(captures) = GO_IMPORT.captures(line) else {
        return Vec::new();
    };
    let name = match captures.get(1) {
        Some(alias) => alias.as_str().to_string(),
        None => {
            let path = &captures[2];
            path.rsplit('/').next().unwrap_or(path).to_string()
        }
    };
    // Blank imports are intentional side-effect imports.
    if name == "_" || !is_identifier(&name) {
        return Vec::new();
    }
    vec![name]
}

fn java_bindings(line: &str) -> Vec<String> {
    let Some(rest) = line.strip_prefix("import ") else {
        return Vec::new();
    };
    let rest = rest.trim_end_matches(';').trim();
    if rest.starts_with("static ") || rest.ends_with('*') {
        return Vec::new();
    }
    let name = rest.rsplit('.').next().unwrap_or(rest);
    if is_identifier(name) {
        vec![name.to_string()]
    } else {
        Vec::new()
    }
}

fn used_elsewhere(lines: &[&str], name: &str, import_line: usize) -> bool {
    lines.iter().enumerate().any(|(idx, line)| {
        idx != import_line && identifier_tokens(line).any(|token| token == name)
    })
}

fn identifier_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::{
        DebugStatements, Detector, HardcodedSecrets, LineLength, MissingDocs, TodoComments,
        UnusedImports, default_detectors, import_bindings,
    };
    use crate::domain::{Severity, SourceFile};
    use crate::language::Family;

    #[test]
    fn registry_declares_detectors_in_fixed_order() {
        let ids: Vec<&str> = default_detectors()
            .iter()
            .map(|detector| detector.id())
            .collect();
        assert_eq!(
            ids,
            vec![
                "unused-import",
                "hardcoded-secret",
                "line-too-long",
                "missing-docs",
                "todo-comment",
                "debug-statement",
            ]
        );
    }

    #[test]
    fn unused_import_flags_python_modules() {
        let file = SourceFile::new("app.py", "import os\nimport sys\n\nos.getcwd()\n");
        let issues = UnusedImports.scan(&file);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(2));
        assert!(issues[0].message.contains("`sys`"));
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn unused_import_respects_aliases() {
        let file = SourceFile::new("app.py", "import numpy as np\n\nx = np.zeros(3)\n");
        assert!(UnusedImports.scan(&file).is_empty());
    }

    #[test]
    fn unused_import_handles_from_imports() {
        let file = SourceFile::new("app.py", "from os import path, sep\n\nprint(path)\n");
        let issues = UnusedImports.scan(&file);

        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("`sep`"));
    }

    #[test]
    fn unused_import_handles_ecmascript_forms() {
        let content = "import React from 'react';\n\
                       import { useState, useEffect } from 'react';\n\
                       const fs = require('fs');\n\
                       \n\
                       useState(0);\n";
        let file = SourceFile::new("app.jsx", content);
        let issues = UnusedImports.scan(&file);

        let names: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
        assert_eq!(issues.len(), 3);
        assert!(names.iter().any(|m| m.contains("`React`")));
        assert!(names.iter().any(|m| m.contains("`useEffect`")));
        assert!(names.iter().any(|m| m.contains("`fs`")));
    }

    #[test]
    fn unused_import_handles_rust_use() {
        let content = "use std::collections::HashMap;\nuse std::io::Read;\n\nfn take(map: HashMap<u8, u8>) -> usize { map.len() }\n";
        let file = SourceFile::new("lib.rs", content);
        let issues = UnusedImports.scan(&file);

        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("`Read`"));
    }

    #[test]
    fn unused_import_skips_grouped_rust_use() {
        let file = SourceFile::new("lib.rs", "use std::io::{Read, Write};\n\nfn nothing() {}\n");
        assert!(UnusedImports.scan(&file).is_empty());
    }

    #[test]
    fn import_bindings_cover_go_and_java() {
        assert_eq!(
            import_bindings(Family::Go, "import \"net/http\""),
            vec!["http".to_string()]
        );
        assert_eq!(
            import_bindings(Family::Go, "import web \"net/http\""),
            vec!["web".to_string()]
        );
        assert!(import_bindings(Family::Go, "import _ \"embed\"").is_empty());
        assert_eq!(
            import_bindings(Family::Java, "import java.util.List;"),
            vec!["List".to_string()]
        );
        assert!(import_bindings(Family::Java, "import java.util.*;").is_empty());
    }

    #[test]
    fn unused_import_is_disabled_for_plaintext() {
        let file = SourceFile::new("notes.unknownext", "import os\n");
        assert!(UnusedImports.scan(&file).is_empty());
    }

    #[test]
    fn hardcoded_secret_flags_string_assignments() {
        let content = "password = \"admin123\"\nAPI_KEY: 'abc'\nchecked = password == \"input\"\n";
        let file = SourceFile::new("config.py", content);
        let issues = HardcodedSecrets.scan(&file);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].line, Some(1));
        assert_eq!(issues[1].line, Some(2));
        assert!(issues.iter().all(|issue| issue.severity == Severity::Critical));
    }

    #[test]
    fn line_length_uses_fixed_threshold() {
        let exactly = "x".repeat(120);
        let over = "y".repeat(121);
        let file = SourceFile::new("long.py", format!("{exactly}\n{over}\n"));
        let issues = LineLength.scan(&file);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(2));
        assert!(issues[0].message.contains("121"));
    }

    #[test]
    fn missing_docs_flags_undocumented_python_def() {
        let content = "def documented():\n    \"\"\"Has a docstring.\"\"\"\n    return 1\n\ndef bare():\n    return 2\n";
        let file = SourceFile::new("app.py", content);
        let issues = MissingDocs.scan(&file);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(5));
        assert!(issues[0].message.contains("`bare`"));
    }

    #[test]
    fn missing_docs_accepts_rust_doc_comments_through_attributes() {
        let content = "/// Documented struct.\n#[derive(Debug)]\nstruct Config;\n\nfn helper() {}\n";
        let file = SourceFile::new("lib.rs", content);
        let issues = MissingDocs.scan(&file);

        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("`helper`"));
    }

    #[test]
    fn missing_docs_is_disabled_for_plaintext() {
        let file = SourceFile::new("notes.unknownext", "def f():\n    pass\n");
        assert!(MissingDocs.scan(&file).is_empty());
    }

    #[test]
    fn todo_comment_truncates_long_lines() {
        let filler = "x".repeat(80);
        let content = format!("# TODO handle retries {filler}\n");
        let file = SourceFile::new("app.py", content);
        let issues = TodoComments.scan(&file);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message.chars().count(), 50);
        assert!(issues[0].message.starts_with("# TODO"));
    }

    #[test]
    fn debug_statement_matches_known_markers() {
        let content = "console.log('x');\nlogger.info('y');\n";
        let file = SourceFile::new("app.js", content);
        let issues = DebugStatements.scan(&file);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(1));
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
