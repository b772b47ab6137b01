//! Folding parsed access-log lines into a bounded [`TrafficSummary`].

use std::collections::HashMap;
use std::hash::Hash;

use forensics_core::models::{LogEvent, LogFormat, SuspiciousHit, TrafficSummary};
use forensics_core::Result;
use tracing::trace;

use crate::classifier::classify;
use crate::parser::parser_for;

/// Label counted in place of an empty user agent.
pub const EMPTY_AGENT_LABEL: &str = "(empty)";

// ── FrequencyTable ────────────────────────────────────────────────────────────

/// Occurrence counter that remembers the order keys were first seen.
///
/// Counts live in an insertion-ordered vector; the map only indexes into it.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    slots: HashMap<K, usize>,
    counts: Vec<(K, u64)>,
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            counts: Vec::new(),
        }
    }

    /// Add one occurrence of `key`.
    pub fn increment(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// The `n` highest counts, descending; equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(K, u64)> {
        if n == 0 {
            return Vec::new();
        }
        let mut ranked = self.counts.clone();
        // Stable sort: ties stay in insertion order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Consume the table, returning every `(key, count)` in first-seen order.
    pub fn into_entries(self) -> Vec<(K, u64)> {
        self.counts
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ── TrafficAggregator ─────────────────────────────────────────────────────────

/// Running state of one aggregation pass.
#[derive(Debug, Default)]
struct TrafficAggregator {
    total: u64,
    paths: FrequencyTable<String>,
    client_addresses: FrequencyTable<String>,
    user_agents: FrequencyTable<String>,
    status_codes: FrequencyTable<u16>,
    suspicious_hits: Vec<SuspiciousHit>,
}

impl TrafficAggregator {
    /// Accumulate one parsed event.
    fn add_event(&mut self, event: LogEvent) {
        self.total += 1;

        let agent_label = if event.user_agent.is_empty() {
            EMPTY_AGENT_LABEL.to_string()
        } else {
            event.user_agent.clone()
        };

        self.paths.increment(event.path.clone());
        self.client_addresses.increment(event.client_address.clone());
        self.user_agents.increment(agent_label.clone());
        self.status_codes.increment(event.status_code);

        if let Some(reason) = classify(&event) {
            self.suspicious_hits.push(SuspiciousHit {
                reason,
                path: event.path,
                user_agent: agent_label,
            });
        }
    }

    /// Rank the tables and bound every list by `top` (status codes excepted).
    fn finish(self, top: usize) -> TrafficSummary {
        let mut status_counts = self.status_codes.into_entries();
        status_counts.sort_by_key(|&(code, _)| code);

        let mut suspicious_hits = self.suspicious_hits;
        suspicious_hits.truncate(top);

        TrafficSummary {
            total: self.total,
            top_paths: self.paths.most_common(top),
            top_ips: self.client_addresses.most_common(top),
            top_agents: self.user_agents.most_common(top),
            status_counts,
            suspicious_hits,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Summarize `lines` parsed under `format`.
///
/// Lines that do not match the grammar are skipped without being counted.
/// `top` bounds the three top-N lists and the suspicious-hit list; the status
/// distribution is always complete.
pub fn summarize<I, S>(lines: I, top: usize, format: LogFormat) -> TrafficSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parser = parser_for(format);
    let mut aggregator = TrafficAggregator::default();

    for (index, line) in lines.into_iter().enumerate() {
        match parser.parse(line.as_ref()) {
            Some(event) => aggregator.add_event(event),
            None => trace!(line = index + 1, format = %format, "Skipping unparsable line"),
        }
    }

    aggregator.finish(top)
}

/// Like [`summarize`], but takes a textual format selector.
///
/// An unknown selector fails with
/// [`ForensicsError::InvalidFormat`](forensics_core::ForensicsError::InvalidFormat)
/// before any line is consumed.
pub fn summarize_with_format<I, S>(lines: I, top: usize, format: &str) -> Result<TrafficSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let format: LogFormat = format.parse()?;
    Ok(summarize(lines, top, format))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
