#![deny(missing_docs)]
//! Codegauge core library.
//!
//! This crate contains the quality scoring engine and project aggregation
//! primitives that power the Codegauge server and CLI.

pub mod analyzer;
pub mod detectors;
pub mod domain;
pub mod error;
pub mod fs;
pub mod language;
pub mod project;
pub mod report;
/// Score weights, bonus constants and band boundaries.
pub mod scoring;

pub use analyzer::{Analyzer, compute_metrics};
pub use detectors::{Detector, MAX_LINE_LENGTH, default_detectors};
pub use domain::{
    Analysis, Issue, LanguageBreakdown, Metrics, ProjectAnalysis, ProjectSummary, Severity,
    SourceFile,
};
pub use error::{Error, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use language::{Family, Language};
pub use project::{MAX_REPORTED_ISSUES, ProjectInspector};
pub use report::{
    FileReport, format_language_counts, render_analysis_markdown, render_json,
    render_project_markdown,
};
pub use scoring::{
    CRITICAL_WEIGHT, DOC_BONUS, DOC_DENSITY_THRESHOLD, INFO_WEIGHT, WARNING_WEIGHT,
    compute_quality_score, score_band, severity_weight,
};
