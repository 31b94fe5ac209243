// ---------------------------------------------------------------------------
// Mitigation table
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::severity::Severity;

/// One entry in the fixed issue/mitigation table.
pub struct Mitigation {
    /// Lookup key; its underscore-separated components double as match
    /// keywords in [`extract_issues`].
    pub key: &'static str,
    pub issue: &'static str,
    pub mitigation: &'static str,
    pub severity: Severity,
}

/// An issue extracted from a discussion, carrying its recommended fix.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Issue {
    pub issue: String,
    pub mitigation: String,
    pub severity: Severity,
}

pub const MITIGATIONS: &[Mitigation] = &[
    Mitigation {
        key: "exposed_gateway",
        issue: "Exposed Gateway/Control Panel",
        mitigation: "Use firewall rules, reverse proxy with authentication, or put behind VPN",
        severity: Severity::Critical,
    },
    Mitigation {
        key: "credential_leak",
        issue: "Credential/API Key Exposure",
        mitigation: "Use environment variables, rotate keys regularly, implement key rotation policies",
        severity: Severity::Critical,
    },
    Mitigation {
        key: "rce",
        issue: "Remote Code Execution (RCE)",
        mitigation: "Run container with non-root user, use seccomp/AppArmor, sandbox execution",
        severity: Severity::Critical,
    },
    Mitigation {
        key: "signal_exposure",
        issue: "Signal Pairing Credentials Exposed",
        mitigation: "Ensure temp files have restricted permissions (600/700), use private directories",
        severity: Severity::High,
    },
    Mitigation {
        key: "no_isolation",
        issue: "No Privilege Separation",
        mitigation: "Run with minimal privileges, use containerization, implement network isolation",
        severity: Severity::High,
    },
    Mitigation {
        key: "auth_bypass",
        issue: "Authentication Bypass",
        mitigation: "Configure reverse proxy authentication, enable rate limiting, use HTTPS",
        severity: Severity::High,
    },
    Mitigation {
        key: "prompt_injection",
        issue: "Prompt Injection Risk",
        mitigation: "Input validation, sandbox prompts, monitor for injection patterns",
        severity: Severity::Medium,
    },
];

/// Scan text for known issues.
///
/// An entry matches when its issue name or any underscore-split component of
/// its key appears in the text (case-insensitive substring). The component
/// match is deliberately loose: short components like "no" over-match, which
/// mirrors how the table has always behaved.
pub fn extract_issues(text: &str) -> Vec<Issue> {
    let lower = text.to_lowercase();
    MITIGATIONS
        .iter()
        .filter(|m| {
            lower.contains(&m.issue.to_lowercase())
                || m.key.split('_').any(|kw| lower.contains(kw))
        })
        .map(|m| Issue {
            issue: m.issue.to_string(),
            mitigation: m.mitigation.to_string(),
            severity: m.severity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rce_key_component_matches() {
        let issues = extract_issues("unauthenticated rce in the wild");
        assert!(issues.iter().any(|i| i.issue.contains("Remote Code Execution")));
    }

    #[test]
    fn issue_name_matches_verbatim() {
        let issues = extract_issues("report about an Authentication Bypass in the proxy");
        assert!(issues.iter().any(|i| i.issue == "Authentication Bypass"));
    }

    #[test]
    fn short_key_components_over_match() {
        // "no" from no_isolation matches "nothing"; kept as documented
        // behavior of the table.
        let issues = extract_issues("nothing to see");
        assert!(issues.iter().any(|i| i.issue == "No Privilege Separation"));
    }

    #[test]
    fn gateway_component_matches() {
        let issues = extract_issues("open gateway on the internet");
        assert!(issues.iter().any(|i| i.issue == "Exposed Gateway/Control Panel"));
        assert_eq!(
            issues.iter().find(|i| i.issue == "Exposed Gateway/Control Panel").unwrap().severity,
            Severity::Critical
        );
    }
}
