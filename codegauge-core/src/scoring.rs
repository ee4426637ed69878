//! Quality score computation.
//!
//! The weights and the documentation bonus are part of the engine's public
//! contract: identical metrics and issues always produce the same score.

use crate::domain::{Issue, Metrics, Severity};

/// Points deducted per critical issue.
pub const CRITICAL_WEIGHT: i32 = 10;
/// Points deducted per warning issue.
pub const WARNING_WEIGHT: i32 = 3;
/// Points deducted per info issue.
pub const INFO_WEIGHT: i32 = 1;
/// Points awarded when comment density clears [`DOC_DENSITY_THRESHOLD`].
pub const DOC_BONUS: i32 = 5;
/// Comment-to-line ratio above which the documentation bonus applies.
pub const DOC_DENSITY_THRESHOLD: f64 = 0.10;

/// Score deduction for one issue of the given severity.
pub fn severity_weight(severity: Severity) -> i32 {
    match severity {
        Severity::Critical => CRITICAL_WEIGHT,
        Severity::Warning => WARNING_WEIGHT,
        Severity::Info => INFO_WEIGHT,
    }
}

/// Compute the 0-100 quality score from metrics and the issue list.
pub fn compute_quality_score(metrics: &Metrics, issues: &[Issue]) -> u8 {
    let mut score: i32 = 100;
    for issue in issues {
        score -= severity_weight(issue.severity);
    }
    if metrics.comment_ratio() > DOC_DENSITY_THRESHOLD {
        score += DOC_BONUS;
    }

    score.clamp(0, 100) as u8
}

/// Human-readable quality band for a score.
pub fn score_band(score: u8) -> &'static str {
    if score >= 80 {
        "Good"
    } else if score >= 60 {
        "Fair"
    } else if score >= 40 {
        "Needs improvement"
    } else {
        "Poor"
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CRITICAL_WEIGHT, DOC_BONUS, compute_quality_score, score_band, severity_weight,
    };
    use crate::domain::{Issue, Metrics, Severity};

    fn metrics_with_comments(total: usize, comments: usize) -> Metrics {
        Metrics {
            total_lines: total,
            non_empty_lines: total,
            comment_lines: comments,
            average_line_length: 10.0,
        }
    }

    fn issue(severity: Severity) -> Issue {
        Issue::at_line("test", severity, 1, "test issue")
    }

    #[test]
    fn clean_file_scores_one_hundred() {
        let metrics = metrics_with_comments(10, 0);
        assert_eq!(compute_quality_score(&metrics, &[]), 100);
    }

    #[test]
    fn weights_match_severity_order() {
        assert!(severity_weight(Severity::Critical) > severity_weight(Severity::Warning));
        assert!(severity_weight(Severity::Warning) > severity_weight(Severity::Info));
    }

    #[test]
    fn each_severity_deducts_its_weight() {
        let metrics = metrics_with_comments(10, 0);
        let issues = vec![
            issue(Severity::Critical),
            issue(Severity::Warning),
            issue(Severity::Info),
        ];
        assert_eq!(compute_quality_score(&metrics, &issues), 100 - 10 - 3 - 1);
    }

    #[test]
    fn score_never_goes_below_zero() {
        let metrics = metrics_with_comments(10, 0);
        let issues: Vec<Issue> = (0..20).map(|_| issue(Severity::Critical)).collect();
        assert_eq!(compute_quality_score(&metrics, &issues), 0);
    }

    #[test]
    fn documentation_bonus_cannot_exceed_one_hundred() {
        let metrics = metrics_with_comments(10, 5);
        assert_eq!(compute_quality_score(&metrics, &[]), 100);
    }

    #[test]
    fn documentation_bonus_requires_density_above_threshold() {
        // 1/10 is exactly the threshold and earns nothing; 2/10 clears it.
        let at_threshold = metrics_with_comments(10, 1);
        let above_threshold = metrics_with_comments(10, 2);
        let issues = vec![issue(Severity::Critical)];

        assert_eq!(compute_quality_score(&at_threshold, &issues), 90);
        assert_eq!(
            compute_quality_score(&above_threshold, &issues),
            (90 + DOC_BONUS) as u8
        );
    }

    #[test]
    fn adding_a_critical_issue_never_increases_the_score() {
        let metrics = metrics_with_comments(10, 0);
        let mut issues = Vec::new();
        let mut previous = compute_quality_score(&metrics, &issues);
        for _ in 0..15 {
            issues.push(issue(Severity::Critical));
            let next = compute_quality_score(&metrics, &issues);
            assert!(next <= previous);
            previous = next;
        }
        assert_eq!(CRITICAL_WEIGHT, 10);
    }

    #[test]
    fn score_bands_follow_documented_boundaries() {
        assert_eq!(score_band(100), "Good");
        assert_eq!(score_band(80), "Good");
        assert_eq!(score_band(79), "Fair");
        assert_eq!(score_band(60), "Fair");
        assert_eq!(score_band(59), "Needs improvement");
        assert_eq!(score_band(40), "Needs improvement");
        assert_eq!(score_band(39), "Poor");
        assert_eq!(score_band(0), "Poor");
    }
}
