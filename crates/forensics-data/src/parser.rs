//! Access-log line grammars.
//!
//! Each [`LogFormat`] has its own [`LineParser`] with an independent pattern;
//! [`parser_for`] selects one. A line that does not match yields `None`.

use forensics_core::models::{LogEvent, LogFormat};
use forensics_core::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// ── Grammars ──────────────────────────────────────────────────────────────────

/// `ip ident user [time] "METHOD target PROTO" status size "referer" "agent"`
static COMBINED_LOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^(?P<ip>\S+) \S+ \S+ \[(?P<time>[^\]]+)\] "#,
        r#""(?P<method>\S+) (?P<path>\S+) (?P<proto>[^"]+)" "#,
        r#"(?P<status>[0-9]{3}) (?P<size>\S+) "#,
        r#""(?P<referer>[^"]*)" "(?P<agent>[^"]*)""#,
    ))
    .expect("combined log regex is valid")
});

/// Same field order, but the protocol token and the referer/agent pair are
/// optional. The size token is captured and never interpreted, so `-` is
/// accepted.
static LENIENT_LOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^(?P<ip>\S+) \S+ \S+ \[(?P<time>[^\]]+)\] "#,
        r#""(?P<method>\S+) (?P<path>\S+)(?: (?P<proto>[^"]*))?" "#,
        r#"(?P<status>[0-9]{3}) (?P<size>\S+)"#,
        r#"(?: "(?P<referer>[^"]*)" "(?P<agent>[^"]*)")?"#,
    ))
    .expect("lenient log regex is valid")
});

// ── LineParser ────────────────────────────────────────────────────────────────

/// Turns one raw access-log line into a [`LogEvent`].
pub trait LineParser: Send + Sync {
    /// Parse `line`, returning `None` when it does not match the grammar.
    fn parse(&self, line: &str) -> Option<LogEvent>;
    fn format(&self) -> LogFormat;
}

/// Strict combined-format parser (`nginx`).
pub struct CombinedParser;

impl LineParser for CombinedParser {
    fn parse(&self, line: &str) -> Option<LogEvent> {
        COMBINED_LOG_RE
            .captures(line.trim())
            .and_then(|caps| event_from_captures(&caps))
    }

    fn format(&self) -> LogFormat {
        LogFormat::Combined
    }
}

/// Lenient combined-format parser (`apache`).
pub struct LenientParser;

impl LineParser for LenientParser {
    fn parse(&self, line: &str) -> Option<LogEvent> {
        LENIENT_LOG_RE
            .captures(line.trim())
            .and_then(|caps| event_from_captures(&caps))
    }

    fn format(&self) -> LogFormat {
        LogFormat::Lenient
    }
}

static COMBINED_PARSER: CombinedParser = CombinedParser;
static LENIENT_PARSER: LenientParser = LenientParser;

/// The parser implementing `format`'s grammar.
pub fn parser_for(format: LogFormat) -> &'static dyn LineParser {
    match format {
        LogFormat::Combined => &COMBINED_PARSER,
        LogFormat::Lenient => &LENIENT_PARSER,
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Strip the query string: everything from the first `?` onwards.
///
/// ```
/// use forensics_data::parser::normalize_path;
///
/// assert_eq!(normalize_path("/page?foo=1"), "/page");
/// assert_eq!(normalize_path("/p?a=1?b=2"), "/p");
/// ```
pub fn normalize_path(raw_path: &str) -> &str {
    raw_path
        .split_once('?')
        .map_or(raw_path, |(path, _query)| path)
}

/// Parse one line under `format`. Returns `None` for empty or malformed lines.
pub fn parse_line(line: &str, format: LogFormat) -> Option<LogEvent> {
    parser_for(format).parse(line)
}

/// Parse one line under a textual format selector (`"nginx"` or `"apache"`).
///
/// The selector is validated before the line is looked at, so an unknown
/// selector fails with [`ForensicsError::InvalidFormat`] even for an empty line.
///
/// [`ForensicsError::InvalidFormat`]: forensics_core::ForensicsError::InvalidFormat
pub fn parse_line_with_format(line: &str, format: &str) -> Result<Option<LogEvent>> {
    let format: LogFormat = format.parse()?;
    Ok(parse_line(line, format))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn event_from_captures(caps: &Captures<'_>) -> Option<LogEvent> {
    // Three ASCII digits always fit; `?` only guards the grammar invariant.
    let status_code = caps.name("status")?.as_str().parse::<u16>().ok()?;

    Some(LogEvent {
        client_address: caps.name("ip")?.as_str().to_string(),
        method: caps.name("method")?.as_str().to_string(),
        path: normalize_path(caps.name("path")?.as_str()).to_string(),
        status_code,
        user_agent: caps
            .name("agent")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
