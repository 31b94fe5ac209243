// ---------------------------------------------------------------------------
// Bundled discussion dataset
// ---------------------------------------------------------------------------
//
// A curated snapshot of security coverage around exposed chat-agent
// installations. Stands in for a live article feed so the intel report works
// out of the box; the trait seam lets tests substitute fixtures.

/// A discussion record before severity rating and issue extraction.
#[derive(Debug, Clone)]
pub struct RawDiscussion {
    pub source: String,
    pub title: String,
    pub url: String,
    pub author: String,
    /// Age of the discussion relative to report generation.
    pub hours_ago: i64,
    /// Editorially assigned severity score. When present it overrides the
    /// keyword-derived score (the bucket is still recomputed from the text).
    pub curated_score: Option<u8>,
    /// Keyword-bearing summary used for rating and issue extraction.
    pub text: String,
}

/// Source of discussion records for the intel report.
pub trait DiscussionSource {
    fn discussions(&self) -> Vec<RawDiscussion>;
}

/// The built-in dataset.
pub struct BundledSource;

impl DiscussionSource for BundledSource {
    fn discussions(&self) -> Vec<RawDiscussion> {
        bundled_discussions()
    }
}

fn entry(
    source: &str,
    title: &str,
    url: &str,
    author: &str,
    hours_ago: i64,
    curated_score: Option<u8>,
    text: &str,
) -> RawDiscussion {
    RawDiscussion {
        source: source.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        author: author.to_string(),
        hours_ago,
        curated_score,
        text: text.to_string(),
    }
}

/// Return the bundled discussion dataset: press coverage first, then
/// social posts.
pub fn bundled_discussions() -> Vec<RawDiscussion> {
    vec![
        entry(
            "The Register",
            "Clawdbot becomes Moltbot, but can't shed security concerns",
            "https://www.theregister.com/2026/01/27/clawdbot_moltbot_security_concerns/",
            "The Register",
            5,
            Some(95),
            "authentication bypass unconfigured reverse proxy credential leaks account takeover",
        ),
        entry(
            "Bitdefender",
            "Moltbot security alert exposed Clawdbot control panels risk credential leaks",
            "https://www.bitdefender.com/en-us/blog/hotforsecurity/moltbot-security-alert-exposed-clawdbot-control-panels-risk-credential-leaks-and-account-takeovers",
            "Bitdefender",
            6,
            Some(90),
            "unauthenticated command execution elevated privileges credential leaks account takeovers",
        ),
        entry(
            "ForkLog",
            "Critical Vulnerabilities Found in Clawdbot AI Agent for Cryptocurrency Theft",
            "https://forklog.com/en/critical-vulnerabilities-found-in-clawdbot-ai-agent-for-cryptocurrency-theft/",
            "ForkLog",
            16,
            Some(100),
            "hundreds of API keys at risk unauthenticated instances credential theft remote code execution",
        ),
        entry(
            "Cointelegraph",
            "Viral AI assistant Clawdbot risks leaking private messages, credentials",
            "https://www.tradingview.com/news/cointelegraph:99cbc6b7d094b:0-viral-ai-assistant-clawdbot-risks-leaking-private-messages-credentials/",
            "Cointelegraph",
            18,
            Some(80),
            "authentication bypass reverse proxy private messages credentials at risk",
        ),
        entry(
            "TrendingTopics",
            "Clawbot: Hyped AI agent risks leaking personal data",
            "https://www.trendingtopics.eu/clawbot-hyped-ai-agent-risks-leaking-personal-data-security-experts-warn/",
            "TrendingTopics",
            17,
            Some(88),
            "signal pairing credentials globally readable temp files root privileges private key prompt injection",
        ),
        entry(
            "X/Twitter",
            "Luca Beurer-Kellner: The @clawdbot project... Good to see security documentation though, (i)PIs are real",
            "https://x.com/lbeurerkellner/status/2009164668720353544",
            "lbeurerkellner",
            8,
            None,
            "personal assistant agent security documentation access control",
        ),
        entry(
            "X/Twitter",
            "@doodlestein: ...unauthorized attacker could be communicating with an LLM-based agent with full rein",
            "https://x.com/doodlestein/status/2007996215892336924",
            "doodlestein",
            12,
            None,
            "security concerns unauthorized attacker LLM agent full rein computer digital life",
        ),
        entry(
            "X/Twitter",
            "adi: simple guide to get started with @clawdbot",
            "https://x.com/IamAdiG/status/2009024662672691355",
            "IamAdiG",
            10,
            None,
            "setup guide getting started",
        ),
    ]
}
