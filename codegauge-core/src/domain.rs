//! Domain entities for Codegauge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::language::Language;

/// A mapping of language names to the number of analyzed files per language.
pub type LanguageBreakdown = BTreeMap<String, usize>;

/// Qualitative rank of an issue, used for display and score weighting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, lowest weight.
    Info,
    /// Likely problem worth fixing.
    Warning,
    /// Must-fix problem, highest weight.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        write!(f, "{label}")
    }
}

/// A single finding produced by one detector rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    /// Stable identifier of the detector that produced this issue.
    pub kind: String,
    /// Severity of the issue.
    pub severity: Severity,
    /// 1-based line number, when the issue points at a specific line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable description of the issue.
    pub message: String,
    /// Source file path, set during project-level aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Issue {
    /// Create an issue anchored to a line of the current file.
    pub fn at_line(
        kind: &str,
        severity: Severity,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            severity,
            line: Some(line),
            message: message.into(),
            file: None,
        }
    }
}

/// Raw text metrics computed in a single pass over a file.
///
/// Lines are split with [`str::lines`], so a trailing newline does not
/// produce a trailing empty line and empty content has zero lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Metrics {
    /// Total number of lines.
    pub total_lines: usize,
    /// Lines containing at least one non-whitespace character.
    pub non_empty_lines: usize,
    /// Lines recognized as comments for the detected language.
    pub comment_lines: usize,
    /// Mean character length of non-empty lines, 0.0 when there are none.
    pub average_line_length: f64,
}

impl Metrics {
    /// Comment density over all lines, 0.0 for an empty file.
    pub fn comment_ratio(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.comment_lines as f64 / self.total_lines as f64
    }
}

/// One file submitted for analysis. Exists only for the duration of a request.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name the content was submitted under.
    pub name: String,
    /// Language detected from the file name.
    pub language: Language,
    /// Raw text content.
    pub content: String,
}

impl SourceFile {
    /// Build a source file, detecting the language from the file name.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let language = Language::detect(&name);
        Self {
            name,
            language,
            content: content.into(),
        }
    }
}

/// Full quality assessment for a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Analysis {
    /// File name the analysis was produced for.
    pub filename: String,
    /// Detected language name, `plaintext` when unknown.
    pub language: String,
    /// Quality score, 0-100 inclusive.
    pub quality_score: u8,
    /// One-line human-readable summary.
    pub summary: String,
    /// Raw text metrics.
    pub metrics: Metrics,
    /// Issues in detector-declaration order, then ascending line number.
    pub issues: Vec<Issue>,
    /// Deduplicated improvement suggestions.
    pub suggestions: Vec<String>,
}

/// Aggregate statistics for a project scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectSummary {
    /// Number of files analyzed successfully.
    pub files_analyzed: usize,
    /// Number of recognized files skipped because they could not be decoded.
    pub files_skipped: usize,
    /// Total line count across analyzed files.
    pub total_lines: usize,
    /// Total issue count before display capping.
    pub total_issues: usize,
    /// Analyzed file counts per language. Values sum to `files_analyzed`.
    pub languages: LanguageBreakdown,
}

/// Merged analysis across every recognized file under a project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectAnalysis {
    /// Project root the scan was run against.
    pub project: String,
    /// Aggregate statistics.
    pub summary: ProjectSummary,
    /// Issue list capped for display, each tagged with its file path.
    pub issues: Vec<Issue>,
    /// Project-level recommendations.
    pub recommendations: Vec<String>,
}
