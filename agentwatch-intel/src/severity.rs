// ---------------------------------------------------------------------------
// Severity rater
// ---------------------------------------------------------------------------
//
// Buckets free text into critical/high/medium/low by counting which bucket's
// keywords appear in it. Presence counts, not occurrences: a keyword found
// three times still contributes one point.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Numeric score for the bucket.
    pub fn score(&self) -> u8 {
        match self {
            Severity::Critical => 100,
            Severity::High => 75,
            Severity::Medium => 50,
            Severity::Low => 25,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const CRITICAL_KEYWORDS: &[&str] = &[
    "rce",
    "remote code execution",
    "root",
    "privilege escalation",
    "unauthenticated",
    "cryptocurrency theft",
    "private key",
    "credential theft",
    "account takeover",
];

const HIGH_KEYWORDS: &[&str] = &[
    "exposed",
    "vulnerability",
    "exploit",
    "arbitrary command",
    "api keys at risk",
    "chat logs",
    "data leak",
    "security bypass",
    "prompt injection",
];

const MEDIUM_KEYWORDS: &[&str] = &[
    "concern",
    "risk",
    "potential",
    "recommend",
    "should be",
    "best practice",
];

const LOW_KEYWORDS: &[&str] = &[
    "tips",
    "guide",
    "how to",
    "setup",
    "configure",
    "documentation",
];

fn count_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}

/// Rate the severity of a piece of text.
///
/// The bucket with the highest keyword-hit count wins; ties resolve in
/// priority order critical > high > medium > low. Text matching nothing
/// rates as low.
pub fn rate_severity(text: &str) -> Severity {
    let lower = text.to_lowercase();
    let critical = count_hits(&lower, CRITICAL_KEYWORDS);
    let high = count_hits(&lower, HIGH_KEYWORDS);
    let medium = count_hits(&lower, MEDIUM_KEYWORDS);
    let low = count_hits(&lower, LOW_KEYWORDS);

    let max = critical.max(high).max(medium).max(low);
    if max == 0 {
        return Severity::Low;
    }

    if critical == max {
        Severity::Critical
    } else if high == max {
        Severity::High
    } else if medium == max {
        Severity::Medium
    } else {
        Severity::Low
    }
}
