//! Project-wide aggregation of per-file analyses.

use std::io;
use std::path::Path;

use crate::analyzer::Analyzer;
use crate::domain::{
    LanguageBreakdown, ProjectAnalysis, ProjectSummary, Severity,
};
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::language::Language;

/// How many issues a project report keeps for display.
pub const MAX_REPORTED_ISSUES: usize = 20;

/// Total line count above which a refactoring recommendation is emitted.
const LARGE_PROJECT_LINES: usize = 100_000;
/// File count above which a structure-review recommendation is emitted.
const MANY_PROJECT_FILES: usize = 500;

/// Runs the scoring engine over every recognized file under a root path and
/// merges the results.
///
/// Aggregation is best-effort: a recognized file that cannot be decoded is
/// skipped and counted, never aborting the scan.
pub struct ProjectInspector<F: FileSystem> {
    fs: F,
    analyzer: Analyzer,
    max_reported_issues: usize,
}

impl<F: FileSystem> ProjectInspector<F> {
    /// Create an inspector with the default display cap.
    pub fn new(fs: F) -> Self {
        Self::with_issue_limit(fs, MAX_REPORTED_ISSUES)
    }

    /// Create an inspector that keeps at most `limit` issues for display.
    pub fn with_issue_limit(fs: F, limit: usize) -> Self {
        Self {
            fs,
            analyzer: Analyzer::new(),
            max_reported_issues: limit,
        }
    }

    /// Analyze every recognized file under `root` and merge the results.
    ///
    /// Fails with [`Error::NotFound`] when the root does not exist; per-file
    /// read failures only increment the skipped counter.
    pub fn analyze_project(&self, root: &Path) -> Result<ProjectAnalysis> {
        let mut files = self.fs.list_files(root).map_err(|err| match err {
            Error::Io(inner) if inner.kind() == io::ErrorKind::NotFound => {
                Error::NotFound(root.to_path_buf())
            }
            other => other,
        })?;
        // File-discovery order is part of the output contract.
        files.sort();

        let mut files_analyzed = 0usize;
        let mut files_skipped = 0usize;
        let mut total_lines = 0usize;
        let mut critical_issues = 0usize;
        let mut critical_files = 0usize;
        let mut languages = LanguageBreakdown::new();
        let mut issues = Vec::new();

        for path in files {
            if Language::detect_path(&path) == Language::Plain {
                continue;
            }
            let content = match self.fs.read_to_string(&path) {
                Ok(content) => content,
                Err(_) => {
                    files_skipped += 1;
                    continue;
                }
            };

            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let analysis = self.analyzer.analyze(&filename, &content);

            files_analyzed += 1;
            total_lines += analysis.metrics.total_lines;
            *languages.entry(analysis.language.clone()).or_insert(0) += 1;

            let mut file_has_critical = false;
            for mut issue in analysis.issues {
                if issue.severity == Severity::Critical {
                    critical_issues += 1;
                    file_has_critical = true;
                }
                issue.file = Some(path.display().to_string());
                issues.push(issue);
            }
            if file_has_critical {
                critical_files += 1;
            }
        }

        let total_issues = issues.len();
        issues.truncate(self.max_reported_issues);

        let recommendations =
            project_recommendations(files_analyzed, total_lines, critical_issues, critical_files);

        Ok(ProjectAnalysis {
            project: root.display().to_string(),
            summary: ProjectSummary {
                files_analyzed,
                files_skipped,
                total_lines,
                total_issues,
                languages,
            },
            issues,
            recommendations,
        })
    }
}

fn project_recommendations(
    files_analyzed: usize,
    total_lines: usize,
    critical_issues: usize,
    critical_files: usize,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if critical_issues > 0 {
        recommendations.push(format!(
            "Address {critical_issues} critical issues immediately"
        ));
    }
    if files_analyzed > 0 && critical_files * 10 > files_analyzed {
        recommendations.push(
            "More than 10% of files contain critical issues - schedule a security review"
                .to_string(),
        );
    }
    if total_lines > LARGE_PROJECT_LINES {
        recommendations
            .push("Large codebase - consider refactoring and modularization".to_string());
    }
    if files_analyzed > MANY_PROJECT_FILES {
        recommendations.push("Many files detected - review project structure".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::{MAX_REPORTED_ISSUES, ProjectInspector, project_recommendations};
    use crate::error::Error;
    use crate::fs::MockFileSystem;
    use std::io;
    use std::path::{Path, PathBuf};

    #[test]
    fn aggregates_language_counts_and_lines() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Ok(vec![
                PathBuf::from("/repo/src/main.rs"),
                PathBuf::from("/repo/app.py"),
                PathBuf::from("/repo/util.py"),
                PathBuf::from("/repo/README.unknownext"),
            ])
        });
        fs.expect_read_to_string()
            .returning(|path| match path.extension().and_then(|ext| ext.to_str()) {
                Some("rs") => Ok("fn main() {}\n".to_string()),
                _ => Ok("x = 1\ny = 2\n".to_string()),
            });

        let inspector = ProjectInspector::new(fs);
        let report = inspector
            .analyze_project(Path::new("/repo"))
            .expect("analyze project");

        assert_eq!(report.summary.files_analyzed, 3);
        assert_eq!(report.summary.files_skipped, 0);
        assert_eq!(report.summary.total_lines, 5);
        assert_eq!(report.summary.languages.get("Python").copied(), Some(2));
        assert_eq!(report.summary.languages.get("Rust").copied(), Some(1));

        let counted: usize = report.summary.languages.values().sum();
        assert_eq!(counted, report.summary.files_analyzed);
    }

    #[test]
    fn skips_undecodable_files_without_aborting() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Ok(vec![
                PathBuf::from("/repo/a.py"),
                PathBuf::from("/repo/blob.py"),
                PathBuf::from("/repo/b.py"),
            ])
        });
        fs.expect_read_to_string().returning(|path| {
            if path.file_name().and_then(|name| name.to_str()) == Some("blob.py") {
                Err(Error::Input("blob.py is not valid UTF-8".to_string()))
            } else {
                Ok("value = 1\n".to_string())
            }
        });

        let inspector = ProjectInspector::new(fs);
        let report = inspector
            .analyze_project(Path::new("/repo"))
            .expect("analyze project");

        assert_eq!(report.summary.files_analyzed, 2);
        assert_eq!(report.summary.files_skipped, 1);
    }

    #[test]
    fn missing_root_maps_to_not_found() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no such directory",
            )))
        });

        let inspector = ProjectInspector::new(fs);
        let error = inspector
            .analyze_project(Path::new("/missing"))
            .expect_err("missing root fails");
        assert!(matches!(error, Error::NotFound(path) if path == Path::new("/missing")));
    }

    #[test]
    fn issues_are_tagged_with_files_and_capped() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Ok((0..30)
                .map(|index| PathBuf::from(format!("/repo/file{index:02}.py")))
                .collect())
        });
        fs.expect_read_to_string()
            .returning(|_| Ok("password = \"hunter2\"\n".to_string()));

        let inspector = ProjectInspector::new(fs);
        let report = inspector
            .analyze_project(Path::new("/repo"))
            .expect("analyze project");

        assert_eq!(report.summary.total_issues, 30);
        assert_eq!(report.issues.len(), MAX_REPORTED_ISSUES);
        assert_eq!(
            report.issues[0].file.as_deref(),
            Some("/repo/file00.py"),
            "issues follow sorted file-discovery order"
        );
        assert!(report.issues.iter().all(|issue| issue.file.is_some()));
    }

    #[test]
    fn discovery_order_is_sorted_for_determinism() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_files().returning(|_| {
            Ok(vec![
                PathBuf::from("/repo/zz.py"),
                PathBuf::from("/repo/aa.py"),
            ])
        });
        fs.expect_read_to_string()
            .returning(|_| Ok("token = 'x'\n".to_string()));

        let inspector = ProjectInspector::new(fs);
        let report = inspector
            .analyze_project(Path::new("/repo"))
            .expect("analyze project");

        assert_eq!(report.issues[0].file.as_deref(), Some("/repo/aa.py"));
        assert_eq!(report.issues[1].file.as_deref(), Some("/repo/zz.py"));
    }

    #[test]
    fn recommendations_follow_aggregate_thresholds() {
        assert!(project_recommendations(10, 100, 0, 0).is_empty());

        let with_critical = project_recommendations(100, 100, 3, 2);
        assert_eq!(with_critical.len(), 1);
        assert!(with_critical[0].contains("3 critical issues"));

        let widespread = project_recommendations(10, 100, 5, 2);
        assert!(widespread.iter().any(|text| text.contains("10%")));

        let large = project_recommendations(501, 200_000, 0, 0);
        assert!(large.iter().any(|text| text.contains("Large codebase")));
        assert!(large.iter().any(|text| text.contains("review project structure")));
    }
}
