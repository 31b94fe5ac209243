// ---------------------------------------------------------------------------
// Intel report builder
// ---------------------------------------------------------------------------
//
// Rates each discussion, dedups by URL, and reduces the lot to the
// dashboard-shaped summary document.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::bundled::DiscussionSource;
use crate::mitigations::{extract_issues, Issue};
use crate::severity::{rate_severity, Severity};

/// Nominal analysis window reported in the document metadata.
pub const HOURS_BACK: u32 = 24;

/// Number of discussions included in the report body.
const MAX_DISCUSSIONS: usize = 20;

/// Number of aggregated issues included in the report.
const MAX_TOP_ISSUES: usize = 10;

/// A rated discussion record.
#[derive(Debug, Clone, Serialize)]
pub struct Discussion {
    pub source: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub date: String,
    pub severity: Severity,
    pub severity_score: u8,
    pub issues: Vec<Issue>,
    pub engagement: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub generated: String,
    pub hours_back: u32,
    pub total_sources: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_discussions: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub average_severity: f64,
    pub total_engagement: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopIssue {
    pub issue: String,
    pub count: usize,
    pub mitigation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscussionSummary {
    pub title: String,
    pub source: String,
    pub url: String,
    pub severity: Severity,
    pub severity_score: u8,
    pub date: String,
    pub engagement: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MitigationAdvice {
    pub issue: String,
    pub mitigation: String,
}

/// The dashboard document served by `/api/intel`.
#[derive(Debug, Clone, Serialize)]
pub struct IntelReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    /// Counts in bucket order: critical, high, medium, low.
    pub severity_distribution: [usize; 4],
    pub source_breakdown: BTreeMap<String, usize>,
    pub top_security_concerns: Vec<TopIssue>,
    pub discussions: Vec<DiscussionSummary>,
    pub mitigations: Vec<MitigationAdvice>,
}

/// Rate every record from a source.
///
/// Press entries keep their curated severity score while the bucket is
/// recomputed from the text; records without a curated score take the
/// keyword-derived score.
pub fn build_discussions(source: &dyn DiscussionSource) -> Vec<Discussion> {
    let now = Utc::now();
    source
        .discussions()
        .into_iter()
        .map(|raw| {
            let severity = rate_severity(&raw.text);
            let severity_score = raw.curated_score.unwrap_or_else(|| severity.score());
            let issues = extract_issues(&raw.text);
            Discussion {
                source: raw.source,
                title: raw.title,
                url: raw.url,
                author: raw.author,
                date: (now - Duration::hours(raw.hours_ago))
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                severity,
                severity_score,
                issues,
                engagement: 0,
            }
        })
        .collect()
}

/// Aggregate rated discussions into the report document.
pub fn build_report(discussions: Vec<Discussion>) -> IntelReport {
    // Dedup by URL, first occurrence wins.
    let mut seen = HashSet::new();
    let mut unique: Vec<Discussion> = discussions
        .into_iter()
        .filter(|d| seen.insert(d.url.clone()))
        .collect();

    // Stable sort: ties keep encounter order.
    unique.sort_by(|a, b| b.severity_score.cmp(&a.severity_score));

    let mut by_severity = [0usize; 4];
    let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
    let mut score_sum = 0u64;
    let mut engagement = 0u64;

    for d in &unique {
        let idx = match d.severity {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        };
        by_severity[idx] += 1;
        *by_source.entry(d.source.clone()).or_default() += 1;
        score_sum += u64::from(d.severity_score);
        engagement += u64::from(d.engagement);
    }

    let average = if unique.is_empty() {
        0.0
    } else {
        let avg = score_sum as f64 / unique.len() as f64;
        (avg * 10.0).round() / 10.0
    };

    let top_issues = aggregate_issues(&unique);

    IntelReport {
        meta: ReportMeta {
            generated: Utc::now().to_rfc3339(),
            hours_back: HOURS_BACK,
            total_sources: by_source.len(),
        },
        summary: ReportSummary {
            total_discussions: unique.len(),
            critical_count: by_severity[0],
            high_count: by_severity[1],
            medium_count: by_severity[2],
            low_count: by_severity[3],
            average_severity: average,
            total_engagement: engagement,
        },
        severity_distribution: by_severity,
        source_breakdown: by_source,
        mitigations: top_issues
            .iter()
            .map(|t| MitigationAdvice {
                issue: t.issue.clone(),
                mitigation: t.mitigation.clone(),
            })
            .collect(),
        discussions: unique
            .iter()
            .take(MAX_DISCUSSIONS)
            .map(|d| DiscussionSummary {
                title: d.title.chars().take(100).collect(),
                source: d.source.clone(),
                url: d.url.clone(),
                severity: d.severity,
                severity_score: d.severity_score,
                date: d.date.clone(),
                engagement: d.engagement,
            })
            .collect(),
        top_security_concerns: top_issues,
    }
}

/// Count issue mentions across all discussions, keeping the first-seen
/// mitigation text for each. Insertion order breaks count ties.
fn aggregate_issues(discussions: &[Discussion]) -> Vec<TopIssue> {
    let mut ordered: Vec<TopIssue> = Vec::new();
    for issue in discussions.iter().flat_map(|d| &d.issues) {
        match ordered.iter_mut().find(|t| t.issue == issue.issue) {
            Some(existing) => existing.count += 1,
            None => ordered.push(TopIssue {
                issue: issue.issue.clone(),
                count: 1,
                mitigation: issue.mitigation.clone(),
            }),
        }
    }
    ordered.sort_by(|a, b| b.count.cmp(&a.count));
    ordered.truncate(MAX_TOP_ISSUES);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::{BundledSource, RawDiscussion};

    struct FixtureSource(Vec<RawDiscussion>);

    impl DiscussionSource for FixtureSource {
        fn discussions(&self) -> Vec<RawDiscussion> {
            self.0.clone()
        }
    }

    fn raw(url: &str, curated: Option<u8>, text: &str) -> RawDiscussion {
        RawDiscussion {
            source: "Test".into(),
            title: format!("title for {url}"),
            url: url.into(),
            author: "tester".into(),
            hours_ago: 1,
            curated_score: curated,
            text: text.into(),
        }
    }

    #[test]
    fn curated_score_kept_but_bucket_recomputed() {
        let source = FixtureSource(vec![raw("u1", Some(42), "remote code execution")]);
        let discussions = build_discussions(&source);
        assert_eq!(discussions[0].severity, Severity::Critical);
        assert_eq!(discussions[0].severity_score, 42);
    }

    #[test]
    fn uncurated_score_follows_bucket() {
        let source = FixtureSource(vec![raw("u1", None, "setup guide")]);
        let discussions = build_discussions(&source);
        assert_eq!(discussions[0].severity, Severity::Low);
        assert_eq!(discussions[0].severity_score, 25);
    }

    #[test]
    fn report_dedups_by_url() {
        let source = FixtureSource(vec![
            raw("dup", Some(90), "remote code execution"),
            raw("dup", Some(10), "setup guide"),
            raw("other", Some(50), "a concern"),
        ]);
        let report = build_report(build_discussions(&source));
        assert_eq!(report.summary.total_discussions, 2);
        // First occurrence of "dup" won.
        assert_eq!(report.discussions[0].severity_score, 90);
    }

    #[test]
    fn report_sorts_by_score_descending() {
        let source = FixtureSource(vec![
            raw("a", Some(30), "setup guide"),
            raw("b", Some(95), "remote code execution"),
            raw("c", Some(60), "a concern"),
        ]);
        let report = build_report(build_discussions(&source));
        let scores: Vec<u8> = report.discussions.iter().map(|d| d.severity_score).collect();
        assert_eq!(scores, vec![95, 60, 30]);
    }

    #[test]
    fn top_issues_aggregate_counts() {
        let source = FixtureSource(vec![
            raw("a", None, "rce here"),
            raw("b", None, "another rce"),
            raw("c", None, "prompt injection"),
        ]);
        let report = build_report(build_discussions(&source));
        let rce = report
            .top_security_concerns
            .iter()
            .find(|t| t.issue == "Remote Code Execution (RCE)")
            .unwrap();
        assert_eq!(rce.count, 2);
        // Most-mentioned issue sorts first.
        assert_eq!(report.top_security_concerns[0].issue, "Remote Code Execution (RCE)");
    }

    #[test]
    fn bundled_report_is_well_formed() {
        let report = build_report(build_discussions(&BundledSource));
        assert_eq!(report.summary.total_discussions, 8);
        assert_eq!(
            report.severity_distribution.iter().sum::<usize>(),
            report.summary.total_discussions
        );
        assert!(report.summary.average_severity > 0.0);
        assert!(report.meta.total_sources >= 2);
        // Press coverage dominated by critical keywords sorts to the top.
        assert_eq!(report.discussions[0].severity_score, 100);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = build_report(vec![]);
        assert_eq!(report.summary.total_discussions, 0);
        assert_eq!(report.summary.average_severity, 0.0);
        assert!(report.discussions.is_empty());
    }
}
