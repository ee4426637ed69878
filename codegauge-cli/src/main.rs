#![deny(missing_docs)]
//! Codegauge command-line interface.
//!
//! Provides batch file analysis and project-wide quality scans.

use clap::{Args, Parser, Subcommand, ValueEnum};
use codegauge_core::{
    Analyzer, FileReport, MAX_REPORTED_ISSUES, ProjectAnalysis, ProjectInspector, StdFileSystem,
    format_language_counts, render_analysis_markdown, render_json, render_project_markdown,
};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "codegauge", version, about = "Codegauge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more source files.
    Analyze {
        /// Files to analyze.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Maximum number of concurrent analyses.
        #[arg(short = 'j', long, default_value_t = 4)]
        concurrency: usize,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Analyze every recognized file under a project directory.
    Project {
        /// Project root to scan.
        #[arg(long)]
        path: PathBuf,
        /// Maximum number of issues kept in the report.
        #[arg(long, default_value_t = MAX_REPORTED_ISSUES)]
        max_issues: usize,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            concurrency,
            report,
        } => run_analyze(files, concurrency, report).await?,
        Commands::Project {
            path,
            max_issues,
            report,
        } => run_project(path, max_issues, report).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_analyze(
    files: Vec<PathBuf>,
    concurrency: usize,
    report: OutputArgs,
) -> CliResult<()> {
    if files.is_empty() {
        println!("No files provided to analyze.");
        return Ok(());
    }

    let concurrency = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let analyzer = Arc::new(Analyzer::new());
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let analyzer = analyzer.clone();
        tasks.spawn(async move {
            let _permit = permit;
            (index, analyze_file(&analyzer, path).await)
        });
    }

    let mut indexed = Vec::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(entry) => indexed.push(entry),
            Err(err) => indexed.push((
                usize::MAX,
                FileReport::failed("unknown".to_string(), err.to_string()),
            )),
        }
    }
    // Report order follows the argument order regardless of task completion.
    indexed.sort_by_key(|(index, _)| *index);
    let reports: Vec<FileReport> = indexed.into_iter().map(|(_, report)| report).collect();

    emit_analysis_reports(&reports, &report).await
}

async fn analyze_file(analyzer: &Analyzer, path: PathBuf) -> FileReport {
    let source = path.display().to_string();
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.clone());
            FileReport::from_analysis(source, analyzer.analyze(&filename, &content))
        }
        Err(err) => FileReport::failed(source, err.to_string()),
    }
}

async fn run_project(path: PathBuf, max_issues: usize, report: OutputArgs) -> CliResult<()> {
    let inspector = ProjectInspector::with_issue_limit(StdFileSystem::new(), max_issues);
    let analysis = tokio::task::spawn_blocking(move || inspector.analyze_project(&path)).await??;
    emit_project_report(&analysis, &report).await
}

async fn emit_analysis_reports(reports: &[FileReport], output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_analysis_text(reports),
        OutputFormat::Markdown => render_analysis_markdown(reports),
        OutputFormat::Json => render_json(reports)?,
    };
    emit_output(output, contents).await
}

async fn emit_project_report(report: &ProjectAnalysis, output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_project_text(report),
        OutputFormat::Markdown => render_project_markdown(report),
        OutputFormat::Json => render_json(report)?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_analysis_text(reports: &[FileReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let _ = writeln!(output, "Source: {}", report.source);
        match &report.analysis {
            Some(analysis) => {
                let _ = writeln!(output, "Summary: {}", analysis.summary);
                let _ = writeln!(
                    output,
                    "Lines: {} total, {} non-empty, {} comments",
                    analysis.metrics.total_lines,
                    analysis.metrics.non_empty_lines,
                    analysis.metrics.comment_lines
                );
                if analysis.issues.is_empty() {
                    let _ = writeln!(output, "Issues: none");
                } else {
                    let _ = writeln!(output, "Issues:");
                    for issue in &analysis.issues {
                        match issue.line {
                            Some(line) => {
                                let _ = writeln!(
                                    output,
                                    "  [{}] line {}: {}",
                                    issue.severity, line, issue.message
                                );
                            }
                            None => {
                                let _ =
                                    writeln!(output, "  [{}] {}", issue.severity, issue.message);
                            }
                        }
                    }
                }
                if !analysis.suggestions.is_empty() {
                    let _ = writeln!(output, "Suggestions:");
                    for suggestion in &analysis.suggestions {
                        let _ = writeln!(output, "  - {suggestion}");
                    }
                }
            }
            None => {
                let _ = writeln!(output, "Status: failed");
            }
        }
        for error in &report.errors {
            let _ = writeln!(output, "Error: {error}");
        }
        let _ = writeln!(output);
    }
    output
}

fn render_project_text(report: &ProjectAnalysis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Project: {}", report.project);
    let summary = &report.summary;
    let _ = writeln!(output, "Files analyzed: {}", summary.files_analyzed);
    if summary.files_skipped > 0 {
        let _ = writeln!(output, "Files skipped: {}", summary.files_skipped);
    }
    let _ = writeln!(output, "Total lines: {}", summary.total_lines);
    let _ = writeln!(output, "Total issues: {}", summary.total_issues);

    if summary.languages.is_empty() {
        let _ = writeln!(output, "Languages: none detected");
    } else {
        let _ = writeln!(output, "Languages:");
        for (language, count) in format_language_counts(&summary.languages) {
            let _ = writeln!(output, "  {language}: {count}");
        }
    }

    if report.issues.is_empty() {
        let _ = writeln!(output, "Issues: none");
    } else {
        let _ = writeln!(output, "Issues:");
        for issue in &report.issues {
            let location = issue.file.as_deref().unwrap_or("?");
            match issue.line {
                Some(line) => {
                    let _ = writeln!(
                        output,
                        "  [{}] {}:{}: {}",
                        issue.severity, location, line, issue.message
                    );
                }
                None => {
                    let _ = writeln!(
                        output,
                        "  [{}] {}: {}",
                        issue.severity, location, issue.message
                    );
                }
            }
        }
    }

    if !report.recommendations.is_empty() {
        let _ = writeln!(output, "Recommendations:");
        for recommendation in &report.recommendations {
            let _ = writeln!(output, "  - {recommendation}");
        }
    }

    output
}
