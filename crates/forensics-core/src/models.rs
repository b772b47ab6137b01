use crate::error::{ForensicsError, Result};
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Access-log layouts understood by the line parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LogFormat {
    /// Strict combined layout; every field is mandatory.
    #[default]
    #[serde(rename = "nginx")]
    Combined,
    /// Combined layout that tolerates a missing protocol token and a missing
    /// referer/user-agent pair.
    #[serde(rename = "apache")]
    Lenient,
}

impl LogFormat {
    /// Every format, in the order they are listed to users.
    pub const ALL: [LogFormat; 2] = [LogFormat::Combined, LogFormat::Lenient];

    /// The selector token for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Combined => "nginx",
            LogFormat::Lenient => "apache",
        }
    }

    /// Comma-separated list of valid selector tokens, e.g. `"nginx, apache"`.
    pub fn valid_tokens() -> String {
        Self::ALL
            .iter()
            .map(LogFormat::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for LogFormat {
    type Err = ForensicsError;

    /// Exact construction from a selector token.
    ///
    /// Accepts `"nginx"` and `"apache"` only. Returns
    /// [`ForensicsError::InvalidFormat`] naming the offending value otherwise.
    fn from_str(value: &str) -> Result<Self> {
        match value {
            "nginx" => Ok(LogFormat::Combined),
            "apache" => Ok(LogFormat::Lenient),
            _ => Err(ForensicsError::InvalidFormat {
                value: value.to_string(),
                valid: Self::valid_tokens(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request line that fully matched the active grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Client address token, exactly as logged (IPv4, IPv6 or hostname).
    pub client_address: String,
    /// HTTP verb token.
    pub method: String,
    /// Request target with any query string removed.
    pub path: String,
    /// Three-digit status code.
    pub status_code: u16,
    /// User-agent header value; empty when not logged.
    pub user_agent: String,
}

/// Why a request was flagged as suspicious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuspicionReason {
    EmptyUserAgent,
    BotLikeUserAgent,
    SuspiciousPath,
}

impl SuspicionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspicionReason::EmptyUserAgent => "empty-user-agent",
            SuspicionReason::BotLikeUserAgent => "bot-like-user-agent",
            SuspicionReason::SuspiciousPath => "suspicious-path",
        }
    }
}

impl fmt::Display for SuspicionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged request. Serialised as a `[reason, path, user_agent]` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousHit {
    pub reason: SuspicionReason,
    pub path: String,
    /// User agent, or `"(empty)"` when none was logged.
    pub user_agent: String,
}

impl Serialize for SuspiciousHit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut triple = serializer.serialize_tuple(3)?;
        triple.serialize_element(&self.reason)?;
        triple.serialize_element(&self.path)?;
        triple.serialize_element(&self.user_agent)?;
        triple.end()
    }
}

/// Result of one aggregation pass.
///
/// Field names and order are relied on verbatim by the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrafficSummary {
    /// Number of lines that parsed into a [`LogEvent`].
    pub total: u64,
    pub top_paths: Vec<(String, u64)>,
    pub top_ips: Vec<(String, u64)>,
    pub top_agents: Vec<(String, u64)>,
    /// Every status code seen, ascending by code.
    pub status_counts: Vec<(u16, u64)>,
    /// First `top` flagged requests, in input order.
    pub suspicious_hits: Vec<SuspiciousHit>,
}
