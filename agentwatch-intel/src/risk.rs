// ---------------------------------------------------------------------------
// Risk scorer
// ---------------------------------------------------------------------------
//
// Maps a set of vulnerability tags to a bounded score: a fixed base plus one
// weight per tag, clamped to [0, 100]. Pure and commutative: the same tag
// set always yields the same score regardless of iteration order.

/// Score every host starts from before tags are applied.
const BASE_SCORE: i32 = 50;

/// Weight applied to tags not present in the table.
const FALLBACK_WEIGHT: i32 = 5;

/// Per-tag weights. The tag set is open-ended; anything unlisted falls back
/// to [`FALLBACK_WEIGHT`].
const RISK_WEIGHTS: &[(&str, i32)] = &[
    ("no_auth", 25),
    ("exposed_api", 15),
    ("exposed_terminal", 30),
    ("outdated_version", 10),
    ("gateway_exposed", 20),
    ("browser_control_exposed", 20),
    ("default_creds", 30),
    ("http_only", 5),
];

fn tag_weight(tag: &str) -> i32 {
    RISK_WEIGHTS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, w)| *w)
        .unwrap_or(FALLBACK_WEIGHT)
}

/// Compute the risk score for a set of vulnerability tags.
///
/// The caller is responsible for deduplication; pass a set, not a list.
pub fn risk_score<'a, I>(tags: I) -> u8
where
    I: IntoIterator<Item = &'a str>,
{
    let total = tags
        .into_iter()
        .fold(BASE_SCORE, |acc, tag| acc + tag_weight(tag));
    total.clamp(0, 100) as u8
}
