//! Fixed heuristics flagging requests that look automated or probe for
//! well-known attack surfaces.

use forensics_core::models::{LogEvent, SuspicionReason};

// ── Heuristic lists ───────────────────────────────────────────────────────────

/// Lowercase user-agent fragments typical of scripts and crawlers.
pub const SUSPICIOUS_AGENTS: &[&str] = &[
    "bot",
    "spider",
    "crawler",
    "curl",
    "wget",
    "python",
    "java",
    "httpclient",
];

/// Lowercase path fragments commonly hit by vulnerability scanners.
pub const SUSPICIOUS_PATH_HINTS: &[&str] = &[
    "/wp-json",
    "/xmlrpc.php",
    "/.env",
    "/phpmyadmin",
    "/wp-admin",
    "/administrator",
];

// ── classify ──────────────────────────────────────────────────────────────────

/// Classify `event`, first matching rule wins:
///
/// 1. empty user agent → [`SuspicionReason::EmptyUserAgent`]
/// 2. agent contains a [`SUSPICIOUS_AGENTS`] token → [`SuspicionReason::BotLikeUserAgent`]
/// 3. path contains a [`SUSPICIOUS_PATH_HINTS`] hint → [`SuspicionReason::SuspiciousPath`]
///
/// Both substring checks are case-insensitive.
pub fn classify(event: &LogEvent) -> Option<SuspicionReason> {
    if event.user_agent.is_empty() {
        return Some(SuspicionReason::EmptyUserAgent);
    }

    let agent = event.user_agent.to_lowercase();
    if SUSPICIOUS_AGENTS.iter().any(|token| agent.contains(token)) {
        return Some(SuspicionReason::BotLikeUserAgent);
    }

    let path = event.path.to_lowercase();
    if SUSPICIOUS_PATH_HINTS.iter().any(|hint| path.contains(hint)) {
        return Some(SuspicionReason::SuspiciousPath);
    }

    None
}
