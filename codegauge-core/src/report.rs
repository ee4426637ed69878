//! Report formatting utilities for Codegauge outputs.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::domain::{Analysis, Issue, LanguageBreakdown, ProjectAnalysis};

/// Analysis result for one input file in a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Input path or name the content was read from.
    pub source: String,
    /// The analysis, absent when the file could not be read.
    pub analysis: Option<Analysis>,
    /// Errors encountered while reading or analyzing the file.
    pub errors: Vec<String>,
}

impl FileReport {
    /// Create a report for a successfully analyzed file.
    pub fn from_analysis(source: String, analysis: Analysis) -> Self {
        Self {
            source,
            analysis: Some(analysis),
            errors: Vec::new(),
        }
    }

    /// Create a report for a file that failed to load.
    pub fn failed(source: String, error: impl Into<String>) -> Self {
        Self {
            source,
            analysis: None,
            errors: vec![error.into()],
        }
    }
}

/// Render a list of file reports as Markdown.
pub fn render_analysis_markdown(reports: &[FileReport]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Codegauge Analysis Report\n");
    for report in reports {
        let _ = writeln!(output, "## {}\n", report.source);
        match &report.analysis {
            Some(analysis) => {
                let _ = writeln!(output, "{}\n", analysis.summary);
                append_metrics(&mut output, analysis);
                append_issues(&mut output, &analysis.issues);
                append_list(
                    &mut output,
                    "Suggestions",
                    &analysis.suggestions,
                    "No suggestions.",
                );
            }
            None => {
                let _ = writeln!(output, "Analysis unavailable.\n");
            }
        }
        append_errors(&mut output, &report.errors);
        let _ = writeln!(output);
    }
    output
}

/// Render a project analysis as Markdown.
pub fn render_project_markdown(report: &ProjectAnalysis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Codegauge Project Report\n");
    let _ = writeln!(output, "## {}\n", report.project);
    let summary = &report.summary;
    let _ = writeln!(output, "- Files analyzed: {}", summary.files_analyzed);
    if summary.files_skipped > 0 {
        let _ = writeln!(output, "- Files skipped: {}", summary.files_skipped);
    }
    let _ = writeln!(output, "- Total lines: {}", summary.total_lines);
    let _ = writeln!(output, "- Total issues: {}", summary.total_issues);
    let _ = writeln!(output);

    append_language_counts(&mut output, &summary.languages);
    append_issues(&mut output, &report.issues);
    append_list(
        &mut output,
        "Recommendations",
        &report.recommendations,
        "No recommendations.",
    );
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Format language counts sorted by count descending, then name.
pub fn format_language_counts(languages: &LanguageBreakdown) -> Vec<(String, usize)> {
    let mut items: Vec<(String, usize)> = languages
        .iter()
        .map(|(name, count)| (name.clone(), *count))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

fn append_metrics(output: &mut String, analysis: &Analysis) {
    let metrics = &analysis.metrics;
    let _ = writeln!(output, "- Language: {}", analysis.language);
    let _ = writeln!(output, "- Quality score: {}/100", analysis.quality_score);
    let _ = writeln!(output, "- Total lines: {}", metrics.total_lines);
    let _ = writeln!(output, "- Non-empty lines: {}", metrics.non_empty_lines);
    let _ = writeln!(output, "- Comment lines: {}", metrics.comment_lines);
    let _ = writeln!(
        output,
        "- Average line length: {:.1}",
        metrics.average_line_length
    );
    let _ = writeln!(output);
}

fn append_language_counts(output: &mut String, languages: &LanguageBreakdown) {
    if languages.is_empty() {
        let _ = writeln!(output, "### Languages\nNo languages detected.\n");
        return;
    }
    let _ = writeln!(output, "### Languages");
    for (language, count) in format_language_counts(languages) {
        let _ = writeln!(output, "- {language}: {count}");
    }
    let _ = writeln!(output);
}

fn append_issues(output: &mut String, issues: &[Issue]) {
    if issues.is_empty() {
        let _ = writeln!(output, "### Issues\nNo issues found.\n");
        return;
    }
    let _ = writeln!(output, "### Issues");
    for issue in issues {
        let location = match (&issue.file, issue.line) {
            (Some(file), Some(line)) => format!("{file}:{line} "),
            (Some(file), None) => format!("{file} "),
            (None, Some(line)) => format!("line {line}: "),
            (None, None) => String::new(),
        };
        let _ = writeln!(output, "- [{}] {}{}", issue.severity, location, issue.message);
    }
    let _ = writeln!(output);
}

fn append_errors(output: &mut String, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    append_list(output, "Errors", errors, "No errors reported.");
}

fn append_list(output: &mut String, title: &str, items: &[String], empty_message: &str) {
    if items.is_empty() {
        let _ = writeln!(output, "### {title}\n{empty_message}\n");
        return;
    }
    let _ = writeln!(output, "### {title}");
    for item in items {
        let _ = writeln!(output, "- {item}");
    }
    let _ = writeln!(output);
}
