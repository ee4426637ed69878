//! Single-file quality analysis.

use crate::detectors::{Detector, MAX_LINE_LENGTH, default_detectors};
use crate::domain::{Analysis, Issue, Metrics, SourceFile};
use crate::language::Family;
use crate::scoring::{compute_quality_score, score_band};

/// Suggested when a file grows beyond this many lines.
const LARGE_FILE_LINES: usize = 500;
/// Suggested when a file carries more than this many import statements.
const MANY_IMPORTS: usize = 20;
/// Suggested when a file carries more than this many TODO/FIXME markers.
const MANY_TODOS: usize = 3;

/// Deterministic quality scoring engine for a single file.
///
/// Running the same (filename, content) pair twice yields byte-identical
/// output: detectors run in declaration order and each reports findings in
/// ascending line order.
pub struct Analyzer {
    detectors: Vec<Box<dyn Detector + Send + Sync>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with the default detector battery.
    pub fn new() -> Self {
        Self {
            detectors: default_detectors(),
        }
    }

    /// Analyze one file and produce its full quality assessment.
    pub fn analyze(&self, filename: &str, content: &str) -> Analysis {
        let file = SourceFile::new(filename, content);
        let metrics = compute_metrics(&file);

        let mut issues = Vec::new();
        for detector in &self.detectors {
            issues.extend(detector.scan(&file));
        }

        let quality_score = compute_quality_score(&metrics, &issues);
        let suggestions = build_suggestions(&file, &metrics, &issues);
        let summary = format!(
            "{} ({}): {} code quality ({}/100) with {} issues found",
            file.name,
            file.language.name(),
            score_band(quality_score),
            quality_score,
            issues.len()
        );

        Analysis {
            filename: file.name.clone(),
            language: file.language.name().to_string(),
            quality_score,
            summary,
            metrics,
            issues,
            suggestions,
        }
    }
}

/// Compute raw text metrics in a single pass over the file.
pub fn compute_metrics(file: &SourceFile) -> Metrics {
    let mut total_lines = 0usize;
    let mut non_empty_lines = 0usize;
    let mut comment_lines = 0usize;
    let mut non_empty_chars = 0usize;

    for line in file.content.lines() {
        total_lines += 1;
        if !line.trim().is_empty() {
            non_empty_lines += 1;
            non_empty_chars += line.chars().count();
        }
        if file.language.is_comment_line(line) {
            comment_lines += 1;
        }
    }

    let average_line_length = if non_empty_lines > 0 {
        non_empty_chars as f64 / non_empty_lines as f64
    } else {
        0.0
    };

    Metrics {
        total_lines,
        non_empty_lines,
        comment_lines,
        average_line_length,
    }
}

fn build_suggestions(file: &SourceFile, metrics: &Metrics, issues: &[Issue]) -> Vec<String> {
    let mut suggestions = Vec::new();
    let fired = |kind: &str| issues.iter().any(|issue| issue.kind == kind);

    if fired("hardcoded-secret") {
        push_unique(
            &mut suggestions,
            "Use environment variables for secrets instead of hardcoded values",
        );
    }
    if fired("unused-import") {
        push_unique(
            &mut suggestions,
            "Remove unused imports to keep the module surface small",
        );
    }
    if fired("line-too-long") {
        push_unique(
            &mut suggestions,
            &format!("Wrap lines longer than {MAX_LINE_LENGTH} characters"),
        );
    }
    if fired("missing-docs") {
        let text = if file.language.family() == Some(Family::Python) {
            "Add docstrings to your functions and classes"
        } else {
            "Add documentation comments to public functions and types"
        };
        push_unique(&mut suggestions, text);
    }
    if metrics.total_lines > LARGE_FILE_LINES {
        push_unique(
            &mut suggestions,
            "Consider breaking this file into smaller modules",
        );
    }
    if file.content.matches("import ").count() > MANY_IMPORTS {
        push_unique(
            &mut suggestions,
            "Many imports detected - consider code organization",
        );
    }
    if issues.iter().filter(|issue| issue.kind == "todo-comment").count() > MANY_TODOS {
        push_unique(
            &mut suggestions,
            "Multiple TODO items - consider addressing technical debt",
        );
    }

    suggestions
}

fn push_unique(suggestions: &mut Vec<String>, text: &str) {
    if !suggestions.iter().any(|existing| existing == text) {
        suggestions.push(text.to_string());
    }
}
