// ---------------------------------------------------------------------------
// Scoring and intelligence
// ---------------------------------------------------------------------------
//
// Pure heuristics: the tag-weight risk scorer, the keyword severity rater,
// the mitigation lookup table, and the bundled discussion report.

pub mod bundled;
pub mod mitigations;
pub mod report;
pub mod risk;
pub mod severity;

pub use bundled::{BundledSource, DiscussionSource, RawDiscussion};
pub use mitigations::{extract_issues, Issue};
pub use report::{build_discussions, build_report, Discussion, IntelReport};
pub use risk::risk_score;
pub use severity::{rate_severity, Severity};
