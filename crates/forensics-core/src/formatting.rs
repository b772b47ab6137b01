//! Text and JSON rendering of a [`TrafficSummary`].

use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::models::TrafficSummary;

/// Render a titled `(label, count)` table.
///
/// Labels are left-aligned and padded to the widest label's display width.
///
/// # Examples
///
/// ```
/// use forensics_core::formatting::render_table;
///
/// let rows = vec![("/".to_string(), 12), ("/login".to_string(), 3)];
/// assert_eq!(render_table("Top paths", &rows), "Top paths:\n  /       12\n  /login  3");
/// assert_eq!(render_table("Top paths", &[]), "Top paths: none");
/// ```
pub fn render_table(title: &str, rows: &[(String, u64)]) -> String {
    if rows.is_empty() {
        return format!("{}: none", title);
    }

    let width = rows
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{}:", title)];
    for (label, count) in rows {
        let padding = " ".repeat(width - label.width());
        lines.push(format!("  {}{}  {}", label, padding, count));
    }
    lines.join("\n")
}

/// Render the status-code distribution, one `code: count` row per line.
pub fn render_status(rows: &[(u16, u64)]) -> String {
    let mut lines = vec!["Status codes:".to_string()];
    for (code, count) in rows {
        lines.push(format!("  {}: {}", code, count));
    }
    lines.join("\n")
}

/// Render the whole summary as the human-readable report.
///
/// The suspicious-hits section is omitted when there are none.
pub fn render_text(summary: &TrafficSummary) -> String {
    let mut sections = vec![
        format!("Total parsed requests: {}", summary.total),
        render_table("Top paths", &summary.top_paths),
        render_table("Top IPs", &summary.top_ips),
        render_table("Top user agents", &summary.top_agents),
        render_status(&summary.status_counts),
    ];

    if !summary.suspicious_hits.is_empty() {
        sections.push("Suspicious hits:".to_string());
        for hit in &summary.suspicious_hits {
            sections.push(format!("  {} | {} | {}", hit.reason, hit.path, hit.user_agent));
        }
    }

    sections.join("\n")
}

/// Render the summary as pretty-printed JSON.
pub fn render_json(summary: &TrafficSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SuspicionReason, SuspiciousHit};

    fn sample_summary() -> TrafficSummary {
        TrafficSummary {
            total: 3,
            top_paths: vec![("/".to_string(), 2), ("/.env".to_string(), 1)],
            top_ips: vec![("203.0.113.10".to_string(), 3)],
            top_agents: vec![("Mozilla/5.0".to_string(), 2), ("(empty)".to_string(), 1)],
            status_counts: vec![(200, 2), (404, 1)],
            suspicious_hits: vec![SuspiciousHit {
                reason: SuspicionReason::EmptyUserAgent,
                path: "/.env".to_string(),
                user_agent: "(empty)".to_string(),
            }],
        }
    }

    // ── render_table ──────────────────────────────────────────────────────────

    #[test]
    fn test_render_table_pads_to_widest_label() {
        let rows = vec![("a".to_string(), 1), ("abc".to_string(), 20)];
        assert_eq!(render_table("T", &rows), "T:\n  a    1\n  abc  20");
    }

    #[test]
    fn test_render_table_uses_display_width() {
        let rows = vec![("日本".to_string(), 1), ("abcd".to_string(), 2)];
        let rendered = render_table("T", &rows);
        assert_eq!(rendered, "T:\n  日本  1\n  abcd  2");
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table("Top IPs", &[]), "Top IPs: none");
    }

    // ── render_status ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_status_empty_has_header_only() {
        assert_eq!(render_status(&[]), "Status codes:");
    }

    #[test]
    fn test_render_status_rows() {
        assert_eq!(
            render_status(&[(200, 2), (503, 1)]),
            "Status codes:\n  200: 2\n  503: 1"
        );
    }

    // ── render_text ───────────────────────────────────────────────────────────

    #[test]
    fn test_render_text_full_report() {
        let text = render_text(&sample_summary());
        let expected = "\
Total parsed requests: 3
Top paths:
  /      2
  /.env  1
Top IPs:
  203.0.113.10  3
Top user agents:
  Mozilla/5.0  2
  (empty)      1
Status codes:
  200: 2
  404: 1
Suspicious hits:
  empty-user-agent | /.env | (empty)";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_omits_empty_suspicious_section() {
        let text = render_text(&TrafficSummary::default());
        assert!(text.starts_with("Total parsed requests: 0"));
        assert!(text.contains("Top paths: none"));
        assert!(!text.contains("Suspicious hits"));
    }

    // ── render_json ───────────────────────────────────────────────────────────

    #[test]
    fn test_render_json_key_order() {
        let json = render_json(&sample_summary()).unwrap();
        let keys = [
            "\"total\"",
            "\"top_paths\"",
            "\"top_ips\"",
            "\"top_agents\"",
            "\"status_counts\"",
            "\"suspicious_hits\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_json_values() {
        let json = render_json(&sample_summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["top_ips"], serde_json::json!([["203.0.113.10", 3]]));
        assert_eq!(
            value["suspicious_hits"],
            serde_json::json!([["empty-user-agent", "/.env", "(empty)"]])
        );
    }
}
